use axum::extract::State;
use axum::Json;
use weekplan_core::client;
use weekplan_core::types::Category;
use weekplan_core::PlannerError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientBody {
    pub table_type: String,
    pub name: String,
}

/// POST /api/client: append a client to a table.
pub async fn create_client(
    State(app): State<AppState>,
    Json(body): Json<CreateClientBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category: Category = body.table_type.parse()?;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let created =
            store.update(|db| Ok(client::add_client(db.table_mut(category), category, body.name)))?;
        Ok::<_, PlannerError>(serde_json::to_value(&created)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameClientBody {
    pub table_type: String,
    pub client_id: String,
    pub name: String,
}

/// PUT /api/client: rename a client.
pub async fn rename_client(
    State(app): State<AppState>,
    Json(body): Json<RenameClientBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category: Category = body.table_type.parse()?;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let renamed = store.update(|db| {
            client::rename_client(db.table_mut(category), &body.client_id, body.name)
        })?;
        Ok::<_, PlannerError>(serde_json::to_value(&renamed)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClientBody {
    pub table_type: String,
    pub client_id: String,
}

/// DELETE /api/client: remove a client and all of its week statuses.
pub async fn delete_client(
    State(app): State<AppState>,
    Json(body): Json<DeleteClientBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category: Category = body.table_type.parse()?;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let removed =
            store.update(|db| client::remove_client(db.table_mut(category), &body.client_id))?;
        Ok::<_, PlannerError>(serde_json::json!({
            "deleted": removed.id,
            "tableType": category,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
