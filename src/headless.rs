//! Map and controls that render to the log instead of a screen.

use std::collections::{HashMap, HashSet};

use skycast_core::LatLon;
use skycast_radar::{MapSurface, PlaybackIcon, RadarControls, TileLayerOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

#[derive(Debug)]
enum LayerKind {
    Tiles(TileLayerOptions),
    Marker(LatLon),
}

#[derive(Debug, Default)]
pub struct TracingMap {
    next_id: u64,
    layers: HashMap<LayerId, LayerKind>,
    attached: HashSet<LayerId>,
}

impl TracingMap {
    fn allocate(&mut self, kind: LayerKind) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(id, kind);
        id
    }

    fn describe(&self, layer: &LayerId) -> String {
        match self.layers.get(layer) {
            Some(LayerKind::Tiles(opts)) => format!("tiles {}", opts.url_template),
            Some(LayerKind::Marker(pos)) => format!("marker {}, {}", pos.lat, pos.lon),
            None => "unknown layer".to_string(),
        }
    }
}

impl MapSurface for TracingMap {
    type Layer = LayerId;

    fn create_tile_layer(&mut self, options: TileLayerOptions) -> LayerId {
        self.allocate(LayerKind::Tiles(options))
    }

    fn add_marker(&mut self, position: LatLon) -> LayerId {
        let id = self.allocate(LayerKind::Marker(position));
        self.attached.insert(id);
        tracing::info!("map: + {}", self.describe(&id));
        id
    }

    fn add_layer(&mut self, layer: &LayerId) {
        if self.attached.insert(*layer) {
            tracing::info!("map: + {}", self.describe(layer));
        }
    }

    fn remove_layer(&mut self, layer: &LayerId) {
        if self.attached.remove(layer) {
            tracing::debug!("map: - {}", self.describe(layer));
        }
    }

    fn has_layer(&self, layer: &LayerId) -> bool {
        self.attached.contains(layer)
    }

    fn set_view(&mut self, center: LatLon, zoom: f64) {
        tracing::info!("map: view {}, {} @ zoom {}", center.lat, center.lon, zoom);
    }
}

#[derive(Debug, Default)]
pub struct TracingControls;

impl RadarControls for TracingControls {
    fn set_time_label(&mut self, label: &str) {
        tracing::info!("radar time: {}", label);
    }

    fn set_playback_icon(&mut self, icon: PlaybackIcon) {
        tracing::debug!("radar button: {:?}", icon);
    }
}
