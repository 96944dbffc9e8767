//! Seams to the map widget and the on-screen radar controls.

use std::sync::Arc;

use parking_lot::Mutex;
use skycast_core::LatLon;

/// A map handle shared by the base map and the radar controller.
///
/// When both locks are needed, take the radar state lock before this one.
pub type SharedMap<M> = Arc<Mutex<M>>;

/// Everything a map needs to build an `{z}/{x}/{y}` tile overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayerOptions {
    /// URL with `{z}`, `{x}`, `{y}` (and optionally `{s}`, `{r}`) placeholders
    pub url_template: String,
    pub opacity: f32,
    pub z_index: i32,
    pub max_zoom: Option<u8>,
    /// Characters substituted for `{s}`
    pub subdomains: String,
}

/// The map-rendering widget.
///
/// Layer handles are opaque to callers; the map decides what they are.
/// Removing a layer that is not attached must be a no-op.
pub trait MapSurface: Send + 'static {
    type Layer: Clone + Send + 'static;

    /// Builds a tile layer without attaching it.
    fn create_tile_layer(&mut self, options: TileLayerOptions) -> Self::Layer;

    /// Builds and attaches a location marker.
    fn add_marker(&mut self, position: LatLon) -> Self::Layer;

    fn add_layer(&mut self, layer: &Self::Layer);

    fn remove_layer(&mut self, layer: &Self::Layer);

    fn has_layer(&self, layer: &Self::Layer) -> bool;

    fn set_view(&mut self, center: LatLon, zoom: f64);
}

/// Glyph shown on the play/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackIcon {
    Play,
    Pause,
}

impl PlaybackIcon {
    /// Inline SVG markup for the button.
    pub fn svg(self) -> &'static str {
        match self {
            Self::Play => {
                r#"<svg viewBox="0 0 24 24" width="24" height="24" fill="currentColor"><path d="M8 5v14l11-7z"/></svg>"#
            }
            Self::Pause => {
                r#"<svg viewBox="0 0 24 24" width="24" height="24" fill="currentColor"><path d="M6 19h4V5H6v14zm8-14v14h4V5h-4z"/></svg>"#
            }
        }
    }
}

/// The time readout and the play/pause button next to the map.
pub trait RadarControls: Send + 'static {
    fn set_time_label(&mut self, label: &str);

    fn set_playback_icon(&mut self, icon: PlaybackIcon);
}
