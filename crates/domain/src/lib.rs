//! # homedash-domain
//!
//! Pure domain model for the homedash home automation dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (heating, cooling, blinds, irrigation, lighting) and
//!   their control mode, schedule, and temperature thresholds
//! - Define **Rooms** (ordered groups of devices, each device owned by one room)
//! - Define **Notices** (human-readable outcome of every operation)
//! - Own the **device store**, the only place device state is mutated
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod notice;
pub mod operation;
pub mod room;
pub mod store;
