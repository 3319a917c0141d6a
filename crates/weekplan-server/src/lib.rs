pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Document
        .route("/api/data", get(routes::data::get_data))
        // Clients
        .route(
            "/api/client",
            post(routes::clients::create_client)
                .put(routes::clients::rename_client)
                .delete(routes::clients::delete_client),
        )
        // Labels
        .route(
            "/api/label",
            post(routes::labels::create_label)
                .put(routes::labels::update_label)
                .delete(routes::labels::delete_label),
        )
        // Week statuses
        .route("/api/week", post(routes::weeks::set_week))
        .route("/api/week/cycle", post(routes::weeks::cycle_week))
        .route("/api/weeks", get(routes::weeks::get_weeks))
        // Reminders
        .route("/api/reminders", get(routes::reminders::get_reminders))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the planning API server on `port`.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the planning API server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("weekplan server listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/api/data");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
