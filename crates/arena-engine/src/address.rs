//! Bot address parsing

use arena_core::{ArenaError, Result};
use std::fmt;

/// Scheme bound to the in-process decision makers
pub const STUPID_SCHEME: &str = "stupid";

/// Parsed `<scheme>://<path>` bot address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotAddress {
    pub scheme: String,
    pub path: String,
}

impl BotAddress {
    /// Parse a raw bot path
    ///
    /// The bare literal `stupid` expands to `stupid://<game>`.
    pub fn parse(raw: &str, game: &str) -> Result<Self> {
        if raw == STUPID_SCHEME {
            return Ok(Self {
                scheme: STUPID_SCHEME.to_string(),
                path: game.to_string(),
            });
        }

        let parts: Vec<&str> = raw.split("://").collect();
        match parts.as_slice() {
            [scheme, path] if !scheme.is_empty() && !path.is_empty() => Ok(Self {
                scheme: scheme.to_string(),
                path: path.to_string(),
            }),
            _ => Err(ArenaError::MalformedAddress(raw.to_string())),
        }
    }
}

impl fmt::Display for BotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.path)
    }
}
