//! Radar frame descriptors as published by the weather-maps endpoint.

use std::fmt::Write as _;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use skycast_core::RadarTileStyle;

use crate::error::RadarError;

/// A single radar snapshot, addressable through its tile path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RadarFrame {
    /// Unix seconds
    pub time: i64,
    pub path: String,
}

/// Past frames followed by nowcast frames, oldest first.
pub type RadarFrameList = Vec<RadarFrame>;

impl RadarFrame {
    pub fn new(time: i64, path: impl Into<String>) -> Self {
        Self {
            time,
            path: path.into(),
        }
    }

    /// Tile URL template for this frame, with `{z}/{x}/{y}` left for the map to fill.
    pub fn tile_url(&self, host: &str, style: &RadarTileStyle) -> String {
        tile_url_template(host, &self.path, style)
    }

    /// Time of day in the local zone, e.g. `14:30`. Empty if the time cannot be rendered.
    pub fn local_time_label(&self, format: &str) -> String {
        format_frame_time(self.time, &Local, format).unwrap_or_else(|| {
            tracing::warn!("Cannot render radar frame time {} with format {:?}", self.time, format);
            String::new()
        })
    }
}

/// Builds `<host><path>/<size>/{z}/{x}/{y}/<color>/<smooth>_<snow>.png`.
pub fn tile_url_template(host: &str, path: &str, style: &RadarTileStyle) -> String {
    format!(
        "{}{}/{}/{{z}}/{{x}}/{{y}}/{}/{}_{}.png",
        host.trim_end_matches('/'),
        path,
        style.size,
        style.color_scheme,
        u8::from(style.smooth),
        u8::from(style.snow),
    )
}

/// Formats a unix timestamp in `tz`. `None` for out-of-range timestamps or a bad format string.
pub fn format_frame_time<Tz>(time: i64, tz: &Tz, format: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::from_timestamp(time, 0)?;
    let mut label = String::new();
    write!(label, "{}", utc.with_timezone(tz).format(format)).ok()?;
    Some(label)
}

/// Body of `weather-maps.json`. Only the radar section is read.
#[derive(Debug, Deserialize)]
pub struct WeatherMapsResponse {
    #[serde(default)]
    pub radar: Option<RadarSection>,
}

#[derive(Debug, Deserialize)]
pub struct RadarSection {
    #[serde(default)]
    pub past: Vec<RadarFrame>,
    #[serde(default)]
    pub nowcast: Vec<RadarFrame>,
}

impl WeatherMapsResponse {
    /// Concatenates past and nowcast frames. Fails when there are no past frames.
    pub fn into_frames(self) -> Result<RadarFrameList, RadarError> {
        let radar = self.radar.ok_or(RadarError::NoFrames)?;
        if radar.past.is_empty() {
            return Err(RadarError::NoFrames);
        }

        let mut frames = radar.past;
        frames.extend(radar.nowcast);
        Ok(frames)
    }
}
