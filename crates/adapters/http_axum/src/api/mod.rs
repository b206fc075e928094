//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod notices;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
pub mod sse;

use axum::Router;
use axum::routing::{get, post, put};

use homedash_app::ports::NoticePublisher;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<P>() -> Router<AppState<P>>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    Router::new()
        // Rooms
        .route("/rooms", get(rooms::list::<P>))
        .route("/rooms/{room}", get(rooms::get::<P>))
        .route("/summary", get(rooms::summary::<P>))
        // Devices
        .route("/devices/{device}", get(devices::find::<P>))
        .route("/rooms/{room}/devices/{device}", get(devices::get::<P>))
        .route(
            "/rooms/{room}/devices/{device}/toggle",
            post(devices::toggle::<P>),
        )
        .route(
            "/rooms/{room}/devices/{device}/mode",
            post(devices::toggle_mode::<P>),
        )
        .route(
            "/rooms/{room}/devices/{device}/schedule",
            put(devices::set_schedule::<P>).delete(devices::clear_schedule::<P>),
        )
        .route(
            "/rooms/{room}/devices/{device}/thresholds",
            put(devices::set_thresholds::<P>),
        )
        // Notices
        .route("/notices", get(notices::list::<P>))
        .route("/notices/stream", get(sse::stream::<P>))
}
