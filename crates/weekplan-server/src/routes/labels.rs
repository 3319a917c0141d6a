use axum::extract::State;
use axum::Json;
use weekplan_core::label::{self, LabelUpdate};
use weekplan_core::types::Category;
use weekplan_core::{week, PlannerError};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct CreateLabelBody {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// POST /api/label: append a label; category defaults to content.
pub async fn create_label(
    State(app): State<AppState>,
    Json(body): Json<CreateLabelBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = match body.category.as_deref() {
        Some(c) => c.parse::<Category>()?,
        None => Category::default(),
    };
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let created = store
            .update(|db| Ok(label::add_label(&mut db.labels, body.name, body.color, category)))?;
        Ok::<_, PlannerError>(serde_json::to_value(&created)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct UpdateLabelBody {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// PUT /api/label: partial label edit. A color change does not rewrite weeks
/// already carrying the old color.
pub async fn update_label(
    State(app): State<AppState>,
    Json(body): Json<UpdateLabelBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = body
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;
    let update = LabelUpdate {
        name: body.name,
        color: body.color,
        category,
    };
    let id = body.id;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let updated = store.update(|db| label::update_label(&mut db.labels, &id, update))?;
        Ok::<_, PlannerError>(serde_json::to_value(&updated)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct DeleteLabelBody {
    pub id: String,
}

/// DELETE /api/label: remove a label and reset its color in both tables.
pub async fn delete_label(
    State(app): State<AppState>,
    Json(body): Json<DeleteLabelBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let removal = store.update(|db| week::delete_label(db, &body.id))?;
        tracing::info!(
            label = %removal.label.id,
            color = %removal.label.color,
            weeks_reset = removal.weeks_reset,
            "label deleted"
        );
        Ok::<_, PlannerError>(serde_json::json!({
            "deleted": removal.label.id,
            "weeksReset": removal.weeks_reset,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weekplan_core::types::Category;
    use weekplan_core::WeekKey;

    fn app() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf());
        (dir, app)
    }

    async fn create(app: &AppState, name: &str, color: &str, category: Option<&str>) -> String {
        create_label(
            State(app.clone()),
            Json(CreateLabelBody {
                name: name.into(),
                color: color.into(),
                category: category.map(String::from),
            }),
        )
        .await
        .unwrap()
        .0["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn create_defaults_to_content() {
        let (_dir, app) = app();
        create(&app, "Planned", "#60a5fa", None).await;
        create(&app, "Live", "#333", Some("music")).await;
        let db = app.store.read().unwrap();
        assert_eq!(db.labels[0].category, Category::Content);
        assert_eq!(db.labels[1].category, Category::Music);
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let (_dir, app) = app();
        let result = create_label(
            State(app),
            Json(CreateLabelBody {
                name: "X".into(),
                color: "#1".into(),
                category: Some("video".into()),
            }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let (_dir, app) = app();
        let id = create(&app, "Planned", "#60a5fa", None).await;
        let json = update_label(
            State(app.clone()),
            Json(UpdateLabelBody {
                id,
                name: None,
                color: Some("#2563eb".into()),
                category: None,
            }),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(json["name"], "Planned");
        assert_eq!(json["color"], "#2563eb");
    }

    #[tokio::test]
    async fn update_missing_label_is_not_found() {
        let (_dir, app) = app();
        let err = update_label(
            State(app),
            Json(UpdateLabelBody {
                id: "missing".into(),
                name: Some("X".into()),
                color: None,
                category: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.0.downcast_ref::<PlannerError>(),
            Some(PlannerError::LabelNotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_cascades_into_both_tables() {
        let (_dir, app) = app();
        let id = create(&app, "Planned", "#111", None).await;
        let wk: WeekKey = "2024-11".parse().unwrap();
        app.store
            .update(|db| {
                let c = weekplan_core::client::add_client(
                    db.table_mut(Category::Content),
                    Category::Content,
                    "Acme",
                );
                let m = weekplan_core::client::add_client(
                    db.table_mut(Category::Music),
                    Category::Music,
                    "Band",
                );
                week::set_status(
                    db.table_mut(Category::Content),
                    &c.id,
                    wk,
                    Some("#111"),
                    Some("keep me"),
                )?;
                week::set_status(db.table_mut(Category::Music), &m.id, wk, Some("#111"), None)?;
                Ok(())
            })
            .unwrap();

        let json = delete_label(State(app.clone()), Json(DeleteLabelBody { id }))
            .await
            .unwrap()
            .0;
        assert_eq!(json["weeksReset"], 2);

        let db = app.store.read().unwrap();
        assert!(db.labels.is_empty());
        let content = &db.tables.content.clients[0];
        assert_eq!(content.weeks[&wk].color, "");
        assert_eq!(content.weeks[&wk].note, "keep me");
        assert!(db.tables.music.clients[0].weeks.is_empty());
    }
}
