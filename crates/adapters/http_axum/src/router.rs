//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use homedash_app::ports::NoticePublisher;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and adds a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level.
pub fn build<P>(state: AppState<P>) -> Router
where
    P: NoticePublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
