use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use upload_engine::UploadSettings;
use upload_logging::upload_info;

/// Looked up in the working directory when no `--config` is given.
pub const CONFIG_FILENAME: &str = "upload_app.ron";
const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Optional settings file, e.g.
///
/// ```ron
/// (
///     endpoint: Some("http://localhost:5000/api/submit"),
///     request_timeout_ms: Some(120000),
///     output_dir: Some("output"),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub field_name: Option<String>,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn upload_settings(&self) -> UploadSettings {
        let defaults = UploadSettings::default();
        UploadSettings {
            endpoint: self.endpoint.clone().unwrap_or(defaults.endpoint),
            field_name: self.field_name.clone().unwrap_or(defaults.field_name),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

/// Loads the given config file, or `upload_app.ron` if it exists.
///
/// An explicitly named file must exist; the implicit one is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let implicit = PathBuf::from(CONFIG_FILENAME);
            if !implicit.exists() {
                return Ok(AppConfig::default());
            }
            implicit
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    upload_info!("Loaded config from {:?}", path);
    Ok(config)
}
