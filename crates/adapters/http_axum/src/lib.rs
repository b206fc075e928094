//! # homedash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** over the device store
//!   (`/api/rooms`, `/api/rooms/{room}/devices/{device}/toggle`, …)
//! - Stream operation notices to clients as **server-sent events**
//! - Map HTTP requests into [`DeviceControlService`] calls (driving adapter)
//! - Map domain errors into status codes (400, 404, 409)
//!
//! The adapter holds no state of its own: every response is rendered from
//! the store snapshot returned by the service.
//!
//! ## Dependency rule
//! Depends on `homedash-app` (for the service and notice bus) and
//! `homedash-domain` (for request/response types). Never leaks axum types
//! into the domain.
//!
//! [`DeviceControlService`]: homedash_app::services::device_control_service::DeviceControlService

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
