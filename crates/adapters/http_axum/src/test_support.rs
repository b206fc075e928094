//! Shared fixtures for handler tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use homedash_app::notice_bus::InProcessNoticeBus;
use homedash_app::services::device_control_service::DeviceControlService;
use homedash_domain::device::{ControlMode, Device, DeviceKind};
use homedash_domain::id::{DeviceId, RoomId};
use homedash_domain::room::Room;
use homedash_domain::store::DeviceStore;

use crate::state::AppState;

fn device(id: &str, name: &str, kind: DeviceKind) -> homedash_domain::device::DeviceBuilder {
    Device::builder()
        .id(DeviceId::new(id).unwrap())
        .name(name)
        .kind(kind)
}

pub(crate) fn test_state() -> AppState<Arc<InProcessNoticeBus>> {
    let living = Room::builder()
        .id(RoomId::new("living-room").unwrap())
        .name("Living Room")
        .device(
            device("heating-1", "Radiator", DeviceKind::Heating)
                .control_mode(ControlMode::Auto)
                .temperature("18°C")
                .build()
                .unwrap(),
        )
        .device(
            device("blinds-1", "Blinds", DeviceKind::Blinds)
                .status(true)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let kitchen = Room::builder()
        .id(RoomId::new("kitchen").unwrap())
        .name("Kitchen")
        .device(
            device("cooling-1", "Air Conditioner", DeviceKind::Cooling)
                .temperature("26°C")
                .build()
                .unwrap(),
        )
        .device(
            device("irrigation-1", "Herb Sprinkler", DeviceKind::Irrigation)
                .control_mode(ControlMode::Auto)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let store = DeviceStore::new(vec![living, kitchen]).unwrap();
    let notice_bus = Arc::new(InProcessNoticeBus::new(16));
    let service = DeviceControlService::new(store, Arc::clone(&notice_bus));
    AppState::new(service, notice_bus)
}

pub(crate) fn test_app() -> Router {
    crate::router::build(test_state())
}

/// Send one request and decode the JSON response body (`Null` if not JSON).
pub(crate) async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
