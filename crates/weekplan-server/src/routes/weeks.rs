use axum::extract::{Query, State};
use axum::Json;
use weekplan_core::calendar::{self, WeekKey};
use weekplan_core::config::Config;
use weekplan_core::label::labels_for;
use weekplan_core::types::Category;
use weekplan_core::{week, PlannerError};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWeekBody {
    pub table_type: String,
    pub client_id: String,
    pub week_key: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// POST /api/week: set color and/or note for one client-week. Omitted fields
/// keep their stored value.
pub async fn set_week(
    State(app): State<AppState>,
    Json(body): Json<SetWeekBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category: Category = body.table_type.parse()?;
    let key: WeekKey = body.week_key.parse()?;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let status = store.update(|db| {
            week::set_status(
                db.table_mut(category),
                &body.client_id,
                key,
                body.color.as_deref(),
                body.note.as_deref(),
            )
        })?;
        Ok::<_, PlannerError>(serde_json::json!({
            "clientId": body.client_id,
            "weekKey": key,
            "color": status.color,
            "note": status.note,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleWeekBody {
    pub table_type: String,
    pub client_id: String,
    pub week_key: String,
}

/// POST /api/week/cycle: advance the week color to the next label of the
/// table's category, wrapping through unset.
pub async fn cycle_week(
    State(app): State<AppState>,
    Json(body): Json<CycleWeekBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category: Category = body.table_type.parse()?;
    let key: WeekKey = body.week_key.parse()?;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let status = store.update(|db| {
            let labels = labels_for(&db.labels, category);
            week::cycle_status(
                db.tables.get_mut(category),
                &body.client_id,
                key,
                &labels,
            )
        })?;
        Ok::<_, PlannerError>(serde_json::json!({
            "clientId": body.client_id,
            "weekKey": key,
            "color": status.color,
            "note": status.note,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct WindowQuery {
    /// Center week; defaults to the current local week.
    #[serde(default)]
    pub week: Option<String>,
}

/// GET /api/weeks: the visible week window around the current week, sized by
/// `past_weeks` / `future_weeks` in the project config.
pub async fn get_weeks(
    State(app): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let current = match query.week.as_deref() {
        Some(w) => w.parse::<WeekKey>()?,
        None => calendar::current_week_key(chrono::Local::now().date_naive()),
    };
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root)?;
        let weeks = calendar::week_window(current, config.past_weeks, config.future_weeks);
        Ok::<_, PlannerError>(serde_json::json!({
            "current": current,
            "weeks": weeks,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weekplan_core::client::add_client;
    use weekplan_core::label::add_label;

    fn app_with_client() -> (tempfile::TempDir, AppState, String) {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf());
        let id = app
            .store
            .update(|db| {
                add_label(&mut db.labels, "Planned", "#a", Category::Content);
                add_label(&mut db.labels, "Live", "#m", Category::Music);
                add_label(&mut db.labels, "Recorded", "#b", Category::Content);
                Ok(add_client(db.table_mut(Category::Content), Category::Content, "Acme").id)
            })
            .unwrap();
        (dir, app, id)
    }

    fn set_body(client_id: &str, color: Option<&str>, note: Option<&str>) -> SetWeekBody {
        SetWeekBody {
            table_type: "content".into(),
            client_id: client_id.into(),
            week_key: "2024-11".into(),
            color: color.map(String::from),
            note: note.map(String::from),
        }
    }

    #[tokio::test]
    async fn set_keeps_omitted_fields() {
        let (_dir, app, id) = app_with_client();
        set_week(State(app.clone()), Json(set_body(&id, Some("#a"), None)))
            .await
            .unwrap();
        let json = set_week(State(app.clone()), Json(set_body(&id, None, Some("call"))))
            .await
            .unwrap()
            .0;
        assert_eq!(json["color"], "#a");
        assert_eq!(json["note"], "call");
        assert_eq!(json["weekKey"], "2024-11");
    }

    #[tokio::test]
    async fn set_rejects_bad_week_key() {
        let (_dir, app, id) = app_with_client();
        let mut body = set_body(&id, Some("#a"), None);
        body.week_key = "2021-53".into();
        let err = set_week(State(app), Json(body)).await.unwrap_err();
        assert!(matches!(
            err.0.downcast_ref::<PlannerError>(),
            Some(PlannerError::InvalidWeek { .. })
        ));
    }

    #[tokio::test]
    async fn cycle_walks_category_labels_then_unset() {
        let (_dir, app, id) = app_with_client();
        let mut seen = Vec::new();
        for _ in 0..3 {
            let json = cycle_week(
                State(app.clone()),
                Json(CycleWeekBody {
                    table_type: "content".into(),
                    client_id: id.clone(),
                    week_key: "2024-11".into(),
                }),
            )
            .await
            .unwrap()
            .0;
            seen.push(json["color"].as_str().unwrap().to_string());
        }
        assert_eq!(seen, vec!["#a", "#b", ""]);
        assert!(app.store.read().unwrap().tables.content.clients[0]
            .weeks
            .is_empty());
    }

    #[tokio::test]
    async fn window_uses_config_range() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            past_weeks: 1,
            future_weeks: 2,
            ..Config::default()
        };
        config.save(dir.path()).unwrap();
        let app = AppState::new(dir.path().to_path_buf());
        let json = get_weeks(
            State(app),
            Query(WindowQuery {
                week: Some("2020-53".into()),
            }),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(json["current"], "2020-53");
        assert_eq!(
            json["weeks"],
            serde_json::json!(["2020-52", "2020-53", "2021-01", "2021-02"])
        );
    }
}
