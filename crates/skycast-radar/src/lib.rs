//! Animated precipitation radar overlay for Skycast maps.
//!
//! Fetches the available radar frames once, keeps a lazily built tile layer per
//! frame, and cycles through them on a fixed timer.

pub mod cache;
pub mod controller;
pub mod error;
pub mod frame;
pub mod map;
pub mod source;
pub mod surface;

pub use cache::TileLayerCache;
pub use controller::{PlaybackState, RadarAvailability, RadarController};
pub use error::RadarError;
pub use frame::{format_frame_time, tile_url_template, RadarFrame, RadarFrameList};
pub use map::BaseMap;
pub use source::RadarFrameSource;
pub use surface::{MapSurface, PlaybackIcon, RadarControls, SharedMap, TileLayerOptions};
