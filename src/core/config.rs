use crate::core::dirs::get_config_directory;
use crate::core::error::SvnBridgeError;
use crate::core::refresh::DEFAULT_REFRESH_INTERVAL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime configuration handed to [`SvnClient`](crate::core::client::SvnClient).
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// The svn client binary; resolved through PATH unless absolute.
    pub svn_program: String,
    /// Working copy root every command runs in.
    pub working_copy: PathBuf,
    /// Cadence of the background refresh loop.
    pub refresh_interval: Duration,
}

impl BridgeConfig {
    /// Defaults for a working copy, applying persisted settings when they
    /// load cleanly.
    pub fn for_working_copy(working_copy: impl AsRef<Path>) -> Self {
        let settings = BridgeSettings::load_or_create().unwrap_or_default();
        BridgeConfig {
            svn_program: settings.svn_program,
            working_copy: working_copy.as_ref().to_path_buf(),
            refresh_interval: Duration::from_millis(settings.refresh_interval_ms),
        }
    }
}

/// Persisted user settings, stored as JSON under the config directory.
#[derive(Serialize, Deserialize, Debug)]
pub struct BridgeSettings {
    pub svn_program: String,
    pub refresh_interval_ms: u64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            svn_program: "svn".to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL.as_millis() as u64,
            updated_at: chrono::Utc::now(),
        }
    }
}

impl BridgeSettings {
    pub fn load_or_create() -> Result<Self, SvnBridgeError> {
        let config_dir = get_config_directory()?;
        let config_file = config_dir.join("config.json");

        if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            let settings = Self::default();
            settings.save()?;
            Ok(settings)
        }
    }

    pub fn save(&self) -> Result<(), SvnBridgeError> {
        let config_dir = get_config_directory()?;
        std::fs::create_dir_all(&config_dir)?;

        let config_file = config_dir.join("config.json");
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_file, content)?;

        Ok(())
    }

    pub fn set_svn_program(&mut self, program: &str) -> Result<(), SvnBridgeError> {
        self.svn_program = program.to_string();
        self.updated_at = chrono::Utc::now();
        self.save()
    }
}
