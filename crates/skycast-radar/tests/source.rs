//! Integration tests for RadarFrameSource and RadarController::initialize using wiremock.

mod support;

use skycast_core::RadarConfig;
use skycast_radar::{PlaybackState, RadarAvailability, RadarError, RadarFrameSource};
use support::Harness;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FRAMES_PATH: &str = "/public/weather-maps.json";

fn config_for(server: &MockServer) -> RadarConfig {
    RadarConfig {
        frames_url: format!("{}{}", server.uri(), FRAMES_PATH),
        ..RadarConfig::default()
    }
}

fn weather_maps_body() -> serde_json::Value {
    serde_json::json!({
        "version": "2.0",
        "generated": 1_700_000_600,
        "host": "https://tilecache.rainviewer.com",
        "radar": {
            "past": [
                {"time": 100, "path": "/a"},
                {"time": 200, "path": "/b"}
            ],
            "nowcast": [
                {"time": 300, "path": "/c"}
            ]
        },
        "satellite": {
            "infrared": [{"time": 100, "path": "/satellite/a"}]
        }
    })
}

async fn mount_body(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(FRAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_frames_success() {
    let server = MockServer::start().await;
    mount_body(&server, weather_maps_body()).await;

    let source = RadarFrameSource::new(&config_for(&server)).unwrap();
    let frames = source.fetch_frames().await.unwrap();

    let paths: Vec<&str> = frames.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["/a", "/b", "/c"]);
}

#[tokio::test]
async fn test_fetch_frames_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FRAMES_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = RadarFrameSource::new(&config_for(&server)).unwrap();
    let err = source.fetch_frames().await.unwrap_err();

    assert!(matches!(err, RadarError::Status(503)), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_fetch_frames_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FRAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let source = RadarFrameSource::new(&config_for(&server)).unwrap();
    let err = source.fetch_frames().await.unwrap_err();

    assert!(matches!(err, RadarError::Parse(_)), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_initialize_enables_radar() {
    let server = MockServer::start().await;
    mount_body(&server, weather_maps_body()).await;
    let h = Harness::new(config_for(&server));

    let availability = h.radar.initialize().await;

    assert!(matches!(availability, RadarAvailability::Enabled { frames: 3 }));
    assert_eq!(h.radar.current_frame().map(|f| f.time), Some(300));
    assert_eq!(h.attached().len(), 1);

    assert_eq!(h.radar.toggle_playback(), PlaybackState::Playing);
    assert_eq!(h.radar.toggle_playback(), PlaybackState::Stopped);
}

#[tokio::test]
async fn test_initialize_twice_fetches_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FRAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_maps_body()))
        .expect(1)
        .mount(&server)
        .await;
    let h = Harness::new(config_for(&server));

    assert!(h.radar.initialize().await.is_enabled());
    assert!(h.radar.initialize().await.is_enabled());
    assert_eq!(h.attached().len(), 1);
}

#[tokio::test]
async fn test_initialize_with_empty_lists_disables_radar() {
    let server = MockServer::start().await;
    mount_body(
        &server,
        serde_json::json!({"radar": {"past": [], "nowcast": []}}),
    )
    .await;
    let h = Harness::new(config_for(&server));

    let availability = h.radar.initialize().await;

    assert!(matches!(
        availability,
        RadarAvailability::Disabled(RadarError::NoFrames)
    ));
    assert!(h.attached().is_empty());
    assert_eq!(h.radar.toggle_playback(), PlaybackState::Stopped);
    assert!(h.controls.lock().icons.is_empty());
}

#[tokio::test]
async fn test_initialize_survives_unreachable_service() {
    // Grab a free port and release it so the connection is refused
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let h = Harness::new(RadarConfig {
        frames_url: format!("http://127.0.0.1:{}{}", port, FRAMES_PATH),
        ..RadarConfig::default()
    });

    let availability = h.radar.initialize().await;

    assert!(matches!(
        availability,
        RadarAvailability::Disabled(RadarError::Network(_))
    ));
    assert!(!h.radar.is_enabled());
    assert!(h.attached().is_empty());
    assert!(h.controls.lock().labels.is_empty());
    assert_eq!(h.radar.toggle_playback(), PlaybackState::Stopped);
}

#[tokio::test]
async fn test_initialize_after_server_error_disables_radar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FRAMES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let h = Harness::new(config_for(&server));

    let availability = h.radar.initialize().await;

    assert!(!availability.is_enabled());
    assert!(h.attached().is_empty());
}
