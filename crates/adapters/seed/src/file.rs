//! TOML seed files.

use serde::Deserialize;

use homedash_domain::room::Room;

use crate::error::SeedError;

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    rooms: Vec<Room>,
}

/// Read and parse rooms from a TOML file.
///
/// # Errors
///
/// Returns [`SeedError::Io`] if the file cannot be read, or any error from
/// [`parse_rooms`].
pub fn load_rooms(path: &str) -> Result<Vec<Room>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_rooms(&content)
}

/// Parse rooms from TOML text and validate each one.
///
/// # Errors
///
/// Returns [`SeedError::Parse`] for malformed TOML or unknown values, and
/// [`SeedError::Invalid`] when a room or device breaks an invariant.
pub fn parse_rooms(content: &str) -> Result<Vec<Room>, SeedError> {
    let file: SeedFile = toml::from_str(content)?;
    for room in &file.rooms {
        room.validate()?;
    }
    Ok(file.rooms)
}
