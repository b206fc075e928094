//! JSON REST handler for the recent notice history.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use homedash_app::ports::NoticePublisher;
use homedash_domain::notice::Notice;

use crate::state::AppState;

const DEFAULT_LIMIT: usize = 20;

/// Query parameters for `GET /api/notices`.
#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// `GET /api/notices?limit=N`: newest first.
pub async fn list<P>(
    State(state): State<AppState<P>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Notice>>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Json(state.notice_bus.recent(limit))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::{send, test_app};

    #[tokio::test]
    async fn should_list_notices_newest_first() {
        let app = test_app();
        send(
            app.clone(),
            "POST",
            "/api/rooms/living-room/devices/blinds-1/toggle",
            None,
        )
        .await;
        send(
            app.clone(),
            "POST",
            "/api/rooms/living-room/devices/heating-1/toggle",
            None,
        )
        .await;

        let (status, body) = send(app, "GET", "/api/notices", None).await;
        assert_eq!(status, StatusCode::OK);
        let notices = body.as_array().unwrap();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0]["level"], "warning");
        assert_eq!(notices[0]["title"], "Automatic mode active");
        assert_eq!(notices[1]["title"], "Device turned off");
    }

    #[tokio::test]
    async fn should_honor_limit() {
        let app = test_app();
        for _ in 0..3 {
            send(
                app.clone(),
                "POST",
                "/api/rooms/kitchen/devices/cooling-1/mode",
                None,
            )
            .await;
        }
        let (_, body) = send(app, "GET", "/api/notices?limit=1", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
