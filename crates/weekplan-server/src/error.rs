use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use weekplan_core::PlannerError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<PlannerError>() {
            Some(e) => match e {
                PlannerError::ClientNotFound(_) | PlannerError::LabelNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                PlannerError::InvalidWeek { .. }
                | PlannerError::InvalidWeekKey(_)
                | PlannerError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
                PlannerError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                PlannerError::Io(_) | PlannerError::Yaml(_) | PlannerError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
