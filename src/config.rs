//! Application-level configuration loading: default palette, gradient settings, extraction
//! and rendering tunables.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{extract::ExtractSettings, state::color::HexColor};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "DIAMOND_LOGO_CONFIG_PATH";
/// Colors every new session starts with.
const DEFAULT_COLORS: [&str; 3] = ["#FF0000", "#00FF00", "#0000FF"];
const DEFAULT_ANGLE: u16 = 45;
const DEFAULT_RASTER_SIZE: u32 = 512;
const DEFAULT_MESH_SEED_MAX: u32 = 1000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Upper bound on a single model call.
const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RASTER_SIZE: u32 = 4096;
/// Sessions untouched for this long are dropped.
const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);
const DEFAULT_SESSION_SWEEP: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    default_colors: Vec<HexColor>,
    default_angle: u16,
    extract: ExtractSettings,
    raster_size: u32,
    mesh_seed_max: u32,
    max_upload_bytes: usize,
    model_timeout: Duration,
    session_idle: Duration,
    session_sweep: Duration,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        colors = app_config.default_colors.len(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Colors a fresh session starts with.
    pub fn default_colors(&self) -> &[HexColor] {
        &self.default_colors
    }

    /// Gradient angle a fresh session starts with.
    pub fn default_angle(&self) -> u16 {
        self.default_angle
    }

    /// Extraction tunables for uploaded images.
    pub fn extract_settings(&self) -> ExtractSettings {
        self.extract
    }

    /// Side length in pixels of PNG exports.
    pub fn raster_size(&self) -> u32 {
        self.raster_size
    }

    /// Largest mesh seed handed out when regenerating.
    pub fn mesh_seed_max(&self) -> u32 {
        self.mesh_seed_max
    }

    /// Largest accepted image upload.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Deadline for a single language-model call.
    pub fn model_timeout(&self) -> Duration {
        self.model_timeout
    }

    /// How long a session may go untouched before it is evicted.
    pub fn session_idle(&self) -> Duration {
        self.session_idle
    }

    /// Period of the idle-session sweep.
    pub fn session_sweep(&self) -> Duration {
        self.session_sweep
    }

    /// Override the idle timeout and the sweep period.
    pub fn with_session_eviction(mut self, idle: Duration, sweep: Duration) -> Self {
        self.session_idle = idle;
        self.session_sweep = sweep;
        self
    }

    /// Override the model deadline.
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_colors: default_colors(),
            default_angle: DEFAULT_ANGLE,
            extract: ExtractSettings::default(),
            raster_size: DEFAULT_RASTER_SIZE,
            mesh_seed_max: DEFAULT_MESH_SEED_MAX,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            model_timeout: DEFAULT_MODEL_TIMEOUT,
            session_idle: DEFAULT_SESSION_IDLE,
            session_sweep: DEFAULT_SESSION_SWEEP,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
/// Every field is optional; missing ones keep their default.
struct RawConfig {
    default_colors: Option<Vec<String>>,
    default_angle: Option<u16>,
    frequency_top_k: Option<usize>,
    palette_size: Option<usize>,
    palette_quality: Option<usize>,
    raster_size: Option<u32>,
    mesh_seed_max: Option<u32>,
    max_upload_bytes: Option<usize>,
    model_timeout_secs: Option<u64>,
    session_idle_secs: Option<u64>,
    session_sweep_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();

        let default_colors = value
            .default_colors
            .map(|raw| {
                raw.iter()
                    .filter_map(|color| match HexColor::parse(color) {
                        Ok(color) => Some(color),
                        Err(err) => {
                            warn!(error = %err, "ignoring invalid default color");
                            None
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|colors| !colors.is_empty())
            .unwrap_or(defaults.default_colors);

        let extract = ExtractSettings {
            top_k: value
                .frequency_top_k
                .filter(|k| *k > 0)
                .unwrap_or(defaults.extract.top_k),
            palette_size: value
                .palette_size
                .filter(|n| *n > 0)
                .unwrap_or(defaults.extract.palette_size),
            quality: value
                .palette_quality
                .filter(|q| *q > 0)
                .unwrap_or(defaults.extract.quality),
        };

        Self {
            default_colors,
            default_angle: value
                .default_angle
                .filter(|angle| *angle < 360)
                .unwrap_or(defaults.default_angle),
            extract,
            raster_size: value
                .raster_size
                .filter(|size| (1..=MAX_RASTER_SIZE).contains(size))
                .unwrap_or(defaults.raster_size),
            mesh_seed_max: value
                .mesh_seed_max
                .filter(|max| *max >= crate::render::mesh::MESH_SEED_MIN)
                .unwrap_or(defaults.mesh_seed_max),
            max_upload_bytes: value
                .max_upload_bytes
                .filter(|bytes| *bytes > 0)
                .unwrap_or(defaults.max_upload_bytes),
            model_timeout: value
                .model_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.model_timeout),
            session_idle: value
                .session_idle_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_idle),
            session_sweep: value
                .session_sweep_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_sweep),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in seed palette shipped with the binary.
fn default_colors() -> Vec<HexColor> {
    DEFAULT_COLORS
        .iter()
        .filter_map(|color| HexColor::parse(color).ok())
        .collect()
}
