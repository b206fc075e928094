//! Seed-specific error type.

use homedash_domain::error::HomeDashError;

/// Errors raised while loading seed rooms.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not valid TOML or does not match the room schema.
    #[error("failed to parse seed file")]
    Parse(#[from] toml::de::Error),

    /// The rooms parsed but break a domain invariant.
    #[error("invalid seed data")]
    Invalid(#[from] HomeDashError),
}
