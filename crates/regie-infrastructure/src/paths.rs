//! Default file locations.
//!
//! All persistent state lives under one per-user configuration directory:
//!
//! ```text
//! ~/.config/regie/
//! └── store.json    # key-value store (session flags, roster, settings)
//! ```

use std::path::PathBuf;

use regie_core::error::{RegieError, Result};

/// Unified path resolution for the Régie toolkit.
pub struct RegiePaths;

impl RegiePaths {
    /// The per-user configuration directory, e.g. `~/.config/regie/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform configuration directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("regie"))
            .ok_or_else(|| RegieError::config("cannot determine configuration directory"))
    }

    /// The default key-value store document.
    pub fn store_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("store.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_file_is_under_config_dir() {
        let store = RegiePaths::store_file().unwrap();
        assert!(store.ends_with("regie/store.json"));
    }
}
