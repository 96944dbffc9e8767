//! Frame list client for the public weather-maps endpoint.

use std::time::Duration;

use reqwest::Client;
use skycast_core::{RadarConfig, ReqwestErrorExt};
use tracing::instrument;

use crate::error::RadarError;
use crate::frame::{RadarFrameList, WeatherMapsResponse};

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct RadarFrameSource {
    client: Client,
    frames_url: String,
}

impl RadarFrameSource {
    pub fn new(config: &RadarConfig) -> Result<Self, RadarError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        // 0 leaves the request unbounded
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| RadarError::Client(e.to_string()))?;

        Ok(Self {
            client,
            frames_url: config.frames_url.clone(),
        })
    }

    pub fn frames_url(&self) -> &str {
        &self.frames_url
    }

    /// Fetches past and nowcast radar frames in display order.
    #[instrument(skip(self), fields(url = %self.frames_url), level = "debug")]
    pub async fn fetch_frames(&self) -> Result<RadarFrameList, RadarError> {
        let response = self
            .client
            .get(&self.frames_url)
            .send()
            .await
            .map_err(|e| RadarError::Network(e.into_network_error()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RadarError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RadarError::Network(e.into_network_error()))?;

        let parsed: WeatherMapsResponse =
            serde_json::from_str(&body).map_err(|e| RadarError::Parse(e.to_string()))?;

        let frames = parsed.into_frames()?;
        tracing::debug!("Fetched {} radar frames", frames.len());
        Ok(frames)
    }
}
