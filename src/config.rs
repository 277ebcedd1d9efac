use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::ids::IdScheme;

pub const APP_ID: &str = "dev.jasper.app";
pub const CONFIG_VERSION: u64 = 1;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("jasper")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct JasperConfig {
    pub data_directory: PathBuf,
    pub id_scheme: IdScheme,
    pub debug_logging: bool,
}

impl Default for JasperConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            id_scheme: IdScheme::default(),
            debug_logging: false,
        }
    }
}

impl JasperConfig {
    /// Ensure the data directory exists.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)
    }
}
