//! Shared application state for axum handlers.

use std::sync::Arc;

use homedash_app::notice_bus::InProcessNoticeBus;
use homedash_app::ports::NoticePublisher;
use homedash_app::services::device_control_service::DeviceControlService;

/// Application state shared across all axum handlers.
///
/// Generic over the notice publisher to avoid dynamic dispatch.
/// `Clone` is implemented manually so `P` itself does not need to be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<P> {
    /// Device operations and store queries.
    pub device_service: Arc<DeviceControlService<P>>,
    /// Notice history and live subscription source.
    pub notice_bus: Arc<InProcessNoticeBus>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            notice_bus: Arc::clone(&self.notice_bus),
        }
    }
}

impl<P> AppState<P>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    /// Create a new application state.
    pub fn new(device_service: DeviceControlService<P>, notice_bus: Arc<InProcessNoticeBus>) -> Self {
        Self {
            device_service: Arc::new(device_service),
            notice_bus,
        }
    }
}
