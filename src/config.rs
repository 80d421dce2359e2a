//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! We look for an inidoc.toml in the working directory, and if present load settings from
//! there. This provides JSON output style, the default log filter and whether `set` may create
//! files that do not exist yet.

use facet::Facet;
use std::fs;

/// File name searched for in the working directory.
pub const CONFIG_FILE: &str = "inidoc.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from inidoc.toml or falling back to defaults.
pub struct Config {
    #[facet(default = true)]
    /// Pretty-print JSON written by `dump --json`.
    pub pretty_json: bool,
    #[facet(default = "warn".to_string())]
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    #[facet(default = true)]
    /// Let `set` start from an empty document when the target file is missing.
    pub create_missing: bool,
}

impl Config {
    #[must_use]
    /// Load configuration from inidoc.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        fs::read_to_string(CONFIG_FILE)
            .ok()
            .and_then(|contents| Self::from_toml(&contents))
            .unwrap_or_else(|| Self::from_toml("").expect("defaults parse"))
    }

    #[must_use]
    /// Parse configuration text, filling absent fields with defaults.
    pub fn from_toml(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
