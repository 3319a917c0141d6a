use axum::extract::{Query, State};
use axum::Json;
use std::collections::HashSet;
use weekplan_core::calendar::{self, WeekKey};
use weekplan_core::config::Config;
use weekplan_core::reminder::{pending_reminders, reminder_week};
use weekplan_core::PlannerError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct RemindersQuery {
    /// Current week; defaults to the current local week.
    #[serde(default)]
    pub week: Option<String>,
    /// Comma-separated client ids the browser dismissed today.
    #[serde(default)]
    pub dismissed: Option<String>,
}

fn parse_dismissed(raw: Option<&str>) -> HashSet<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// GET /api/reminders: clients with no status for the week after `week`.
pub async fn get_reminders(
    State(app): State<AppState>,
    Query(query): Query<RemindersQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let current = match query.week.as_deref() {
        Some(w) => w.parse::<WeekKey>()?,
        None => calendar::current_week_key(chrono::Local::now().date_naive()),
    };
    let next = reminder_week(current)?;
    let dismissed = parse_dismissed(query.dismissed.as_deref());
    let root = app.root.clone();
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root)?;
        let db = store.read()?;
        let reminders = pending_reminders(&db, current, &dismissed, &config.neutral_color);
        let items: Vec<serde_json::Value> = reminders
            .iter()
            .map(|r| {
                serde_json::json!({
                    "tableType": r.category,
                    "clientId": r.client.id,
                    "name": r.client.name,
                })
            })
            .collect();
        Ok::<_, PlannerError>(serde_json::json!({
            "week": current,
            "nextWeek": next,
            "reminders": items,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
