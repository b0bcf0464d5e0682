//! Validation run configuration
//!
//! Renderer executables and the output root live in an optional
//! `validation.toml` next to the working directory; everything falls back
//! to defaults that match a checkout with an in-tree Nori build.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

const CONFIG_FILE: &str = "validation.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Nori renderer executable, invoked as `<nori> -b <scene>.xml`.
    pub nori_executable: PathBuf,
    /// Mitsuba renderer executable, invoked as `<mitsuba> -o <out> <scene>.xml`.
    pub mitsuba_executable: PathBuf,
    /// Root directory that per-suite directories are created under.
    pub output_root: PathBuf,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            nori_executable: PathBuf::from("build/nori"),
            mitsuba_executable: PathBuf::from("mitsuba"),
            output_root: PathBuf::from("validation/scenes"),
        }
    }
}

impl ValidationConfig {
    /// Load `validation.toml` from the working directory, falling back to
    /// defaults when it is absent or unreadable.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring invalid {}: {}", CONFIG_FILE, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
