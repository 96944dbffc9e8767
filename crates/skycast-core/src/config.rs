use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Base map settings
    #[serde(default)]
    pub map: MapConfig,

    /// Radar overlay settings
    #[serde(default)]
    pub radar: RadarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial zoom level (fractional zoom allowed)
    pub zoom: f64,

    /// Zoom used when the map is focused on a searched location
    pub focus_zoom: f64,

    /// Base layer URL template with `{s}`, `{z}`, `{x}`, `{y}` and `{r}` placeholders
    pub base_tile_url: String,

    /// Subdomains substituted for `{s}`, one character each
    pub base_subdomains: String,

    pub base_max_zoom: u8,

    /// Initial map center
    pub center: LatLon,

    /// Location marked and zoomed to once the map is up
    pub home: Option<LatLon>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LatLon::new(46.603354, 1.888334),
            zoom: 5.5,
            focus_zoom: 10.0,
            base_tile_url: "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png"
                .to_string(),
            base_subdomains: "abcd".to_string(),
            base_max_zoom: 19,
            home: None,
        }
    }
}

/// Rendering options baked into radar tile URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarTileStyle {
    /// Tile edge in pixels (256 or 512)
    pub size: u32,

    /// Upstream color scheme id
    pub color_scheme: u8,

    pub smooth: bool,

    /// Render snow in a separate color
    pub snow: bool,
}

impl Default for RadarTileStyle {
    fn default() -> Self {
        Self {
            size: 256,
            color_scheme: 2,
            smooth: true,
            snow: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// JSON endpoint listing available radar frames
    pub frames_url: String,

    /// Host prefixed to each frame's tile path
    pub tile_host: String,

    /// Radar layer opacity, 0.0 to 1.0
    pub opacity: f32,

    /// Stacking order of the radar layer; must sit above the base map
    pub z_index: i32,

    /// Delay between animation frames in milliseconds
    pub frame_interval_ms: u64,

    /// `chrono` format string for the frame time label
    pub time_format: String,

    /// HTTP timeout for the frame list request
    pub request_timeout_secs: u64,

    /// Start the animation as soon as frames are available
    pub autoplay: bool,

    pub style: RadarTileStyle,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            frames_url: "https://api.rainviewer.com/public/weather-maps.json".to_string(),
            tile_host: "https://tile.rainviewer.com".to_string(),
            style: RadarTileStyle::default(),
            opacity: 0.6,
            z_index: 100,
            frame_interval_ms: 500,
            time_format: "%H:%M".to_string(),
            request_timeout_secs: 10,
            autoplay: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycast");

        Self {
            config_dir,
            map: MapConfig::default(),
            radar: RadarConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating a default file if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating a default file if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.radar.frames_url, "radar.frames_url", &mut result);
        self.validate_url(&self.radar.tile_host, "radar.tile_host", &mut result);

        if !(0.0..=1.0).contains(&self.radar.opacity) {
            result.add_error("radar.opacity", "Opacity must be between 0.0 and 1.0");
        } else if self.radar.opacity == 0.0 {
            result.add_warning("radar.opacity", "Radar layer is fully transparent");
        }

        if self.radar.frame_interval_ms == 0 {
            result.add_error(
                "radar.frame_interval_ms",
                "Frame interval must be greater than 0",
            );
        } else if self.radar.frame_interval_ms < 100 {
            result.add_warning(
                "radar.frame_interval_ms",
                "Frame interval under 100ms may outrun tile loading",
            );
        }

        if self.radar.z_index <= 0 {
            result.add_warning(
                "radar.z_index",
                "Radar layer may render below the base map",
            );
        }

        if !matches!(self.radar.style.size, 256 | 512) {
            result.add_error("radar.style.size", "Tile size must be 256 or 512");
        }

        let unsupported_format = StrftimeItems::new(&self.radar.time_format)
            .any(|item| matches!(item, Item::Error));
        if self.radar.time_format.trim().is_empty() {
            result.add_error("radar.time_format", "Time format cannot be empty");
        } else if unsupported_format {
            result.add_error(
                "radar.time_format",
                format!("Unsupported time format: {}", self.radar.time_format),
            );
        }

        if self.radar.request_timeout_secs == 0 {
            result.add_warning(
                "radar.request_timeout_secs",
                "Request timeout disabled (0 seconds)",
            );
        }

        if !(-90.0..=90.0).contains(&self.map.center.lat)
            || !(-180.0..=180.0).contains(&self.map.center.lon)
        {
            result.add_error("map.center", "Center must be a valid latitude/longitude");
        }

        let max_zoom = f64::from(self.map.base_max_zoom);
        if self.map.zoom < 0.0 || self.map.zoom > max_zoom {
            result.add_error(
                "map.zoom",
                format!("Zoom must be between 0 and {}", self.map.base_max_zoom),
            );
        }
        if self.map.focus_zoom < 0.0 || self.map.focus_zoom > max_zoom {
            result.add_error(
                "map.focus_zoom",
                format!("Focus zoom must be between 0 and {}", self.map.base_max_zoom),
            );
        }

        if self.map.base_tile_url.contains("{s}") && self.map.base_subdomains.is_empty() {
            result.add_error(
                "map.base_subdomains",
                "Base tile URL uses {s} but no subdomains are configured",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skycast");

        Ok(config_dir.join("config.toml"))
    }
}
