//! Server-Sent Events (SSE) stream of operation notices.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use homedash_app::ports::NoticePublisher;
use homedash_domain::notice::NoticeLevel;

use crate::state::AppState;

/// `GET /api/notices/stream`: SSE stream of notices as they are published.
///
/// Each notice is sent as a JSON `data:` frame with the notice level as the
/// SSE event name. The stream continues until the client disconnects.
pub async fn stream<P>(
    State(state): State<AppState<P>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    let notice_rx = state.notice_bus.subscribe();
    let notice_stream = BroadcastStream::new(notice_rx).filter_map(|result| match result {
        Ok(notice) => match serde_json::to_string(&notice) {
            Ok(json) => Some(Ok(Event::default()
                .event(level_name(notice.level))
                .data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize notice for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some notices were dropped");
            None
        }
    });

    Sse::new(notice_stream).keep_alive(KeepAlive::default())
}

fn level_name(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::id::{DeviceId, RoomId};

    use crate::test_support::test_state;

    #[tokio::test]
    async fn should_forward_published_notices_to_subscribers() {
        let state = test_state();
        let mut rx = state.notice_bus.subscribe();

        let _sse_response = stream(State(state.clone())).await;

        state
            .device_service
            .toggle_device(
                &RoomId::new("living-room").unwrap(),
                &DeviceId::new("blinds-1").unwrap(),
            )
            .await
            .unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.title, "Device turned off");
        assert_eq!(received.device_id, "blinds-1");
    }
}
