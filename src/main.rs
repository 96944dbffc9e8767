mod headless;

use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use skycast_core::{AppError, Config};
use skycast_radar::{BaseMap, RadarAvailability, RadarController, RadarFrameSource};

use headless::{TracingControls, TracingMap};

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Config directory: {}", config.config_dir.display());

    let map = Arc::new(Mutex::new(TracingMap::default()));
    let mut base = BaseMap::new(map.clone(), &config.map);
    if let Some(home) = config.map.home {
        base.focus(home);
    }

    let source = RadarFrameSource::new(&config.radar).map_err(AppError::from)?;
    let radar = RadarController::new(map, TracingControls, source, config.radar.clone());

    match radar.initialize().await {
        RadarAvailability::Enabled { frames } => {
            tracing::info!("Radar ready ({} frames)", frames);
            if config.radar.autoplay {
                radar.toggle_playback();
            }
        }
        RadarAvailability::Disabled(reason) => {
            tracing::info!("Radar disabled: {}", reason.user_message());
        }
    }

    tracing::info!("Skycast running, press Ctrl-C to exit");
    tokio::signal::ctrl_c().await.map_err(AppError::from)?;

    radar.shutdown();
    tracing::info!("Skycast stopped");
    Ok(())
}
