//! # homedash-adapter-seed
//!
//! Seed data for the device store. The store has no persistence, so every
//! process starts from one of these sources:
//!
//! | Source | Function | Contents |
//! |--------|----------|----------|
//! | Built-in demo | [`demo_rooms`] | Living room, kitchen, bedroom, garden |
//! | TOML file | [`load_rooms`] | `[[rooms]]` tables with nested `[[rooms.devices]]` |
//!
//! ## Dependency rule
//!
//! Depends on `homedash-domain` only.

mod demo;
mod error;
mod file;

pub use demo::demo_rooms;
pub use error::SeedError;
pub use file::{load_rooms, parse_rooms};

use homedash_domain::store::DeviceStore;

/// Build a store from `path` when given, otherwise from the demo rooms.
///
/// # Errors
///
/// Returns [`SeedError`] if the file cannot be read or parsed, or if the
/// rooms violate a domain invariant.
pub fn seed_store(path: Option<&str>) -> Result<DeviceStore, SeedError> {
    let rooms = match path {
        Some(path) => load_rooms(path)?,
        None => demo_rooms()?,
    };
    let store = DeviceStore::new(rooms)?;
    tracing::info!(
        source = path.unwrap_or("demo"),
        rooms = store.rooms().len(),
        "device store seeded"
    );
    Ok(store)
}
