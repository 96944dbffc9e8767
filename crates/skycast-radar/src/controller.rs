//! Radar animation controller.
//!
//! Owns the frame list, the per-frame tile layer cache and the playback timer
//! for one map. Exactly one radar layer is attached to the map at a time.
//!
//! Playback runs as a spawned tokio task driven by an interval. Pausing cancels
//! the task's token while holding the state lock, and every tick re-checks the
//! token under that same lock, so no tick can advance the frame once
//! `toggle_playback` has returned.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use skycast_core::RadarConfig;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::cache::TileLayerCache;
use crate::error::RadarError;
use crate::frame::{RadarFrame, RadarFrameList};
use crate::source::RadarFrameSource;
use crate::surface::{MapSurface, PlaybackIcon, RadarControls, SharedMap, TileLayerOptions};

/// Animation state. Starts `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

/// Outcome of bringing the radar up.
#[derive(Debug)]
pub enum RadarAvailability {
    Enabled { frames: usize },
    /// The rest of the map stays usable; radar is simply absent.
    Disabled(RadarError),
}

impl RadarAvailability {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

struct RadarState<M: MapSurface, C: RadarControls> {
    config: RadarConfig,
    frames: RadarFrameList,
    layers: TileLayerCache<M::Layer>,
    current_index: usize,
    playback: PlaybackState,
    ticker: Option<CancellationToken>,
    controls: C,
    /// Set once frames are loaded and the play/pause control is live.
    wired: bool,
}

impl<M: MapSurface, C: RadarControls> RadarState<M, C> {
    fn show_frame(&mut self, map: &SharedMap<M>, index: usize) -> bool {
        let Some(frame) = self.frames.get(index) else {
            return false;
        };

        let mut surface = map.lock();
        for layer in self.layers.layers() {
            if surface.has_layer(layer) {
                surface.remove_layer(layer);
            }
        }

        let config = &self.config;
        let layer = self
            .layers
            .get_or_insert_with(frame.time, || {
                surface.create_tile_layer(radar_layer_options(frame, config))
            })
            .clone();
        surface.add_layer(&layer);
        drop(surface);

        let label = frame.local_time_label(&self.config.time_format);
        self.controls.set_time_label(&label);
        self.current_index = index;

        tracing::trace!("Showing radar frame {} ({})", index, frame.time);
        true
    }

    fn advance(&mut self, map: &SharedMap<M>) {
        if self.frames.is_empty() {
            return;
        }
        let next = (self.current_index + 1) % self.frames.len();
        self.show_frame(map, next);
    }

    fn stop_ticker(&mut self) {
        if let Some(token) = self.ticker.take() {
            token.cancel();
        }
    }
}

fn radar_layer_options(frame: &RadarFrame, config: &RadarConfig) -> TileLayerOptions {
    TileLayerOptions {
        url_template: frame.tile_url(&config.tile_host, &config.style),
        opacity: config.opacity,
        z_index: config.z_index,
        max_zoom: None,
        subdomains: String::new(),
    }
}

pub struct RadarController<M: MapSurface, C: RadarControls> {
    map: SharedMap<M>,
    source: RadarFrameSource,
    frame_interval: Duration,
    state: Arc<Mutex<RadarState<M, C>>>,
}

impl<M: MapSurface, C: RadarControls> RadarController<M, C> {
    pub fn new(map: SharedMap<M>, controls: C, source: RadarFrameSource, config: RadarConfig) -> Self {
        let frame_interval = Duration::from_millis(config.frame_interval_ms.max(1));
        let state = RadarState {
            config,
            frames: Vec::new(),
            layers: TileLayerCache::new(),
            current_index: 0,
            playback: PlaybackState::Stopped,
            ticker: None,
            controls,
            wired: false,
        };

        Self {
            map,
            source,
            frame_interval,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Fetches the frame list and, if any radar frames exist, shows the most
    /// recent one and enables the play/pause control.
    ///
    /// Failures are logged and reported as `Disabled`; they never propagate.
    pub async fn initialize(&self) -> RadarAvailability {
        if let Some(frames) = self.enabled_frame_count() {
            return RadarAvailability::Enabled { frames };
        }

        match self.source.fetch_frames().await {
            Ok(frames) => self.load_frames(frames),
            Err(e) => {
                tracing::warn!("Radar init failed: {}", e);
                RadarAvailability::Disabled(e)
            }
        }
    }

    /// Installs an already-fetched frame list. Same outcome rules as `initialize`.
    pub fn load_frames(&self, frames: RadarFrameList) -> RadarAvailability {
        let mut state = self.state.lock();
        if state.wired {
            return RadarAvailability::Enabled {
                frames: state.frames.len(),
            };
        }
        if frames.is_empty() {
            tracing::warn!("Radar init failed: {}", RadarError::NoFrames);
            return RadarAvailability::Disabled(RadarError::NoFrames);
        }

        let count = frames.len();
        state.frames = frames;
        state.show_frame(&self.map, count - 1);
        state.wired = true;

        tracing::info!("Radar enabled with {} frames", count);
        RadarAvailability::Enabled { frames: count }
    }

    /// Displays frame `index`. Returns `false` and leaves the map untouched
    /// when there is no such frame.
    pub fn show_frame(&self, index: usize) -> bool {
        self.state.lock().show_frame(&self.map, index)
    }

    /// Flips between `Stopped` and `Playing` and returns the new state.
    ///
    /// Does nothing until frames have been loaded. Starting playback needs a
    /// tokio runtime; without one the controller stays stopped.
    pub fn toggle_playback(&self) -> PlaybackState {
        let mut state = self.state.lock();
        if !state.wired {
            tracing::debug!("Radar playback toggled before frames loaded; ignoring");
            return state.playback;
        }

        match state.playback {
            PlaybackState::Stopped => {
                let runtime = match tokio::runtime::Handle::try_current() {
                    Ok(handle) => handle,
                    Err(e) => {
                        tracing::warn!("Cannot start radar animation: {}", e);
                        return state.playback;
                    }
                };

                let index = state.current_index;
                state.show_frame(&self.map, index);

                let token = CancellationToken::new();
                runtime.spawn(run_animation(
                    Arc::downgrade(&self.state),
                    self.map.clone(),
                    token.clone(),
                    self.frame_interval,
                ));
                state.ticker = Some(token);
                state.playback = PlaybackState::Playing;
                state.controls.set_playback_icon(PlaybackIcon::Pause);
                tracing::debug!("Radar animation started");
            }
            PlaybackState::Playing => {
                state.stop_ticker();
                state.playback = PlaybackState::Stopped;
                state.controls.set_playback_icon(PlaybackIcon::Play);
                tracing::debug!("Radar animation paused at frame {}", state.current_index);
            }
        }

        state.playback
    }

    pub fn playback(&self) -> PlaybackState {
        self.state.lock().playback
    }

    pub fn is_enabled(&self) -> bool {
        self.state.lock().wired
    }

    /// Index of the displayed frame, if radar is enabled.
    pub fn current_index(&self) -> Option<usize> {
        let state = self.state.lock();
        state.wired.then_some(state.current_index)
    }

    pub fn current_frame(&self) -> Option<RadarFrame> {
        let state = self.state.lock();
        if !state.wired {
            return None;
        }
        state.frames.get(state.current_index).cloned()
    }

    pub fn frames(&self) -> RadarFrameList {
        self.state.lock().frames.clone()
    }

    pub fn cached_layer_count(&self) -> usize {
        self.state.lock().layers.len()
    }

    /// Stops playback, detaches every radar layer and forgets the frames.
    ///
    /// The controller is disabled afterwards; `initialize` may bring it back.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.stop_ticker();
        state.playback = PlaybackState::Stopped;
        state.wired = false;
        state.current_index = 0;
        state.frames.clear();

        let layers = state.layers.drain();
        let mut surface = self.map.lock();
        for layer in &layers {
            if surface.has_layer(layer) {
                surface.remove_layer(layer);
            }
        }

        tracing::info!("Radar shut down ({} layers released)", layers.len());
    }

    fn enabled_frame_count(&self) -> Option<usize> {
        let state = self.state.lock();
        state.wired.then_some(state.frames.len())
    }
}

impl<M: MapSurface, C: RadarControls> Drop for RadarController<M, C> {
    fn drop(&mut self) {
        self.state.lock().stop_ticker();
    }
}

async fn run_animation<M: MapSurface, C: RadarControls>(
    state: Weak<Mutex<RadarState<M, C>>>,
    map: SharedMap<M>,
    token: CancellationToken,
    period: Duration,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                // Controller dropped
                let Some(shared) = state.upgrade() else {
                    break;
                };
                let mut guard = shared.lock();
                if token.is_cancelled() {
                    break;
                }
                guard.advance(&map);
            }
        }
    }

    tracing::trace!("Radar animation task finished");
}
