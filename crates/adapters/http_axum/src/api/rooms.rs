//! JSON REST handlers for rooms and the store summary.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use homedash_app::ports::NoticePublisher;
use homedash_domain::room::Room;
use homedash_domain::store::{Summary, resolve_room};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Room>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Room>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/rooms`
pub async fn list<P>(State(state): State<AppState<P>>) -> ListResponse
where
    P: NoticePublisher + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.device_service.list_rooms()))
}

/// `GET /api/rooms/{room}`
pub async fn get<P>(
    State(state): State<AppState<P>>,
    Path(room): Path<String>,
) -> Result<GetResponse, ApiError>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    let room_id = resolve_room(&room)?;
    let room = state.device_service.get_room(&room_id)?;
    Ok(GetResponse::Ok(Json(room)))
}

/// `GET /api/summary`
pub async fn summary<P>(State(state): State<AppState<P>>) -> Json<Summary>
where
    P: NoticePublisher + Send + Sync + 'static,
{
    Json(state.device_service.summary())
}
