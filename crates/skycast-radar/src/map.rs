//! Base map setup and the searched-location marker.

use skycast_core::{LatLon, MapConfig};

use crate::surface::{MapSurface, SharedMap, TileLayerOptions};

/// Base tiles sit at the bottom of the stack; radar layers go above.
const BASE_LAYER_Z_INDEX: i32 = 1;

pub struct BaseMap<M: MapSurface> {
    map: SharedMap<M>,
    base_layer: M::Layer,
    marker: Option<M::Layer>,
    focus_zoom: f64,
}

impl<M: MapSurface> BaseMap<M> {
    /// Sets the initial view and attaches the base tile layer.
    pub fn new(map: SharedMap<M>, config: &MapConfig) -> Self {
        let base_layer = {
            let mut surface = map.lock();
            surface.set_view(config.center, config.zoom);

            let layer = surface.create_tile_layer(TileLayerOptions {
                url_template: config.base_tile_url.clone(),
                opacity: 1.0,
                z_index: BASE_LAYER_Z_INDEX,
                max_zoom: Some(config.base_max_zoom),
                subdomains: config.base_subdomains.clone(),
            });
            surface.add_layer(&layer);
            layer
        };

        tracing::debug!(
            "Base map ready at {}, {} (zoom {})",
            config.center.lat,
            config.center.lon,
            config.zoom
        );

        Self {
            map,
            base_layer,
            marker: None,
            focus_zoom: config.focus_zoom,
        }
    }

    /// Moves the location marker to `position` and zooms in on it.
    pub fn focus(&mut self, position: LatLon) {
        let mut surface = self.map.lock();
        if let Some(old) = self.marker.take() {
            surface.remove_layer(&old);
        }
        self.marker = Some(surface.add_marker(position));
        surface.set_view(position, self.focus_zoom);
        tracing::info!("Map focused on {}, {}", position.lat, position.lon);
    }

    pub fn base_layer(&self) -> &M::Layer {
        &self.base_layer
    }

    pub fn marker(&self) -> Option<&M::Layer> {
        self.marker.as_ref()
    }

    pub fn map(&self) -> &SharedMap<M> {
        &self.map
    }
}
