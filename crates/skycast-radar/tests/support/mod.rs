//! In-memory map and controls that record every call.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use skycast_core::{LatLon, RadarConfig};
use skycast_radar::{
    MapSurface, PlaybackIcon, RadarControls, RadarController, RadarFrame, RadarFrameSource,
    SharedMap, TileLayerOptions,
};

#[derive(Debug, Default)]
pub struct RecordingMap {
    next_id: u32,
    pub created: Vec<(u32, TileLayerOptions)>,
    pub attached: Vec<u32>,
    pub add_calls: usize,
    pub markers: Vec<LatLon>,
}

impl RecordingMap {
    pub fn url_of(&self, layer: u32) -> Option<&str> {
        self.created
            .iter()
            .find(|(id, _)| *id == layer)
            .map(|(_, opts)| opts.url_template.as_str())
    }
}

impl MapSurface for RecordingMap {
    type Layer = u32;

    fn create_tile_layer(&mut self, options: TileLayerOptions) -> u32 {
        self.next_id += 1;
        self.created.push((self.next_id, options));
        self.next_id
    }

    fn add_marker(&mut self, position: LatLon) -> u32 {
        self.next_id += 1;
        self.markers.push(position);
        self.attached.push(self.next_id);
        self.next_id
    }

    fn add_layer(&mut self, layer: &u32) {
        self.add_calls += 1;
        if !self.attached.contains(layer) {
            self.attached.push(*layer);
        }
    }

    fn remove_layer(&mut self, layer: &u32) {
        self.attached.retain(|id| id != layer);
    }

    fn has_layer(&self, layer: &u32) -> bool {
        self.attached.contains(layer)
    }

    fn set_view(&mut self, _center: LatLon, _zoom: f64) {}
}

#[derive(Debug, Default)]
pub struct ControlsLog {
    pub labels: Vec<String>,
    pub icons: Vec<PlaybackIcon>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingControls(pub Arc<Mutex<ControlsLog>>);

impl RadarControls for RecordingControls {
    fn set_time_label(&mut self, label: &str) {
        self.0.lock().labels.push(label.to_string());
    }

    fn set_playback_icon(&mut self, icon: PlaybackIcon) {
        self.0.lock().icons.push(icon);
    }
}

pub type TestController = RadarController<RecordingMap, RecordingControls>;

pub struct Harness {
    pub radar: TestController,
    pub map: SharedMap<RecordingMap>,
    pub controls: Arc<Mutex<ControlsLog>>,
}

impl Harness {
    pub fn new(config: RadarConfig) -> Self {
        let map: SharedMap<RecordingMap> = Arc::new(Mutex::new(RecordingMap::default()));
        let controls = RecordingControls::default();
        let log = controls.0.clone();
        let source = RadarFrameSource::new(&config).unwrap();
        let radar = RadarController::new(map.clone(), controls, source, config);

        Self {
            radar,
            map,
            controls: log,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RadarConfig::default())
    }

    pub fn attached(&self) -> Vec<u32> {
        self.map.lock().attached.clone()
    }

    pub fn add_calls(&self) -> usize {
        self.map.lock().add_calls
    }
}

/// The three-frame list used across scenarios: t=100, 200, 300.
pub fn abc_frames() -> Vec<RadarFrame> {
    vec![
        RadarFrame::new(100, "/a"),
        RadarFrame::new(200, "/b"),
        RadarFrame::new(300, "/c"),
    ]
}
