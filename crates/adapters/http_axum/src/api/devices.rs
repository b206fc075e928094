//! JSON REST handlers for devices.
//!
//! Mutating endpoints answer with the applied [`Transition`] so clients can
//! render both the new device snapshot and the state change. A body that
//! fails to decode is passed to the service as an error, which reports it
//! only after the address, kind, and mode checks.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use homedash_app::ports::NoticePublisher;
use homedash_domain::device::{Device, DeviceState, Schedule, TemperatureThresholds};
use homedash_domain::error::{NotFoundError, ValidationError};
use homedash_domain::id::{DeviceId, RoomId};
use homedash_domain::operation::{Command, Operation};
use homedash_domain::store::{Transition, resolve_address};

use crate::error::ApiError;
use crate::state::AppState;

/// A device together with its derived state-machine node.
#[derive(Serialize)]
pub struct DeviceView {
    #[serde(flatten)]
    pub device: Device,
    pub state: DeviceState,
}

impl From<Device> for DeviceView {
    fn from(device: Device) -> Self {
        let state = device.state();
        Self { device, state }
    }
}

/// A device found by id alone, with the room that holds it.
#[derive(Serialize)]
pub struct LocatedDeviceView {
    pub room_id: RoomId,
    #[serde(flatten)]
    pub view: DeviceView,
}

/// Possible responses from the get endpoints.
pub enum GetResponse {
    Ok(Json<DeviceView>),
    Located(Json<LocatedDeviceView>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Located(json) => json.into_response(),
        }
    }
}

/// Possible responses from the mutating endpoints.
pub enum ApplyResponse {
    Applied(Json<Transition>),
}

impl IntoResponse for ApplyResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Applied(json) => json.into_response(),
        }
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    serde_json::from_slice(body).map_err(|err| ValidationError::InvalidPayload {
        reason: err.to_string(),
    })
}

async fn submit<P>(
    state: &AppState<P>,
    room: &str,
    device: &str,
    operation: Operation,
    payload: Result<Command, ValidationError>,
) -> Result<ApplyResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    let transition = state
        .device_service
        .submit(room, device, operation, payload)
        .await?;
    Ok(ApplyResponse::Applied(Json(transition)))
}

async fn apply<P>(
    state: &AppState<P>,
    room: &str,
    device: &str,
    command: Command,
) -> Result<ApplyResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    submit(state, room, device, command.operation(), Ok(command)).await
}

/// `GET /api/rooms/{room}/devices/{device}`
pub async fn get<P>(
    State(state): State<AppState<P>>,
    Path((room, device)): Path<(String, String)>,
) -> Result<GetResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    let (room_id, device_id) = resolve_address(&room, &device)?;
    let device = state.device_service.get_device(&room_id, &device_id)?;
    Ok(GetResponse::Ok(Json(device.into())))
}

/// `GET /api/devices/{device}`: first match in room order.
pub async fn find<P>(
    State(state): State<AppState<P>>,
    Path(device): Path<String>,
) -> Result<GetResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    let device_id = DeviceId::new(device.as_str()).map_err(|_| NotFoundError {
        entity: "Device",
        id: device,
    })?;
    let (room_id, device) = state.device_service.find_device(&device_id)?;
    Ok(GetResponse::Located(Json(LocatedDeviceView {
        room_id,
        view: device.into(),
    })))
}

/// `POST /api/rooms/{room}/devices/{device}/toggle`
pub async fn toggle<P>(
    State(state): State<AppState<P>>,
    Path((room, device)): Path<(String, String)>,
) -> Result<ApplyResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    apply(&state, &room, &device, Command::ToggleDevice).await
}

/// `POST /api/rooms/{room}/devices/{device}/mode`
pub async fn toggle_mode<P>(
    State(state): State<AppState<P>>,
    Path((room, device)): Path<(String, String)>,
) -> Result<ApplyResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    apply(&state, &room, &device, Command::ToggleControlMode).await
}

/// `PUT /api/rooms/{room}/devices/{device}/schedule`
pub async fn set_schedule<P>(
    State(state): State<AppState<P>>,
    Path((room, device)): Path<(String, String)>,
    body: Bytes,
) -> Result<ApplyResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    let payload = decode::<Schedule>(&body).map(|schedule| Command::SetSchedule { schedule });
    submit(&state, &room, &device, Operation::SetSchedule, payload).await
}

/// `DELETE /api/rooms/{room}/devices/{device}/schedule`
pub async fn clear_schedule<P>(
    State(state): State<AppState<P>>,
    Path((room, device)): Path<(String, String)>,
) -> Result<ApplyResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    apply(&state, &room, &device, Command::ClearSchedule).await
}

/// `PUT /api/rooms/{room}/devices/{device}/thresholds`
pub async fn set_thresholds<P>(
    State(state): State<AppState<P>>,
    Path((room, device)): Path<(String, String)>,
    body: Bytes,
) -> Result<ApplyResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    let payload = decode::<TemperatureThresholds>(&body)
        .map(|thresholds| Command::SetTemperatureThresholds { thresholds });
    submit(
        &state,
        &room,
        &device,
        Operation::SetTemperatureThresholds,
        payload,
    )
    .await
}
