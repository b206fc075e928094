//! # homedash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `NoticePublisher`: fire-and-forget delivery of operation notices
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceControlService`: the four device operations plus queries
//! - Provide **in-process infrastructure** (notice bus) that doesn't need IO
//! - Serialize access to the device store so each operation is atomic
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod notice_bus;
pub mod ports;
pub mod services;
