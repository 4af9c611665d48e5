//! Shared test helpers.

use gemini_proxy_service::config::{CommonConfig, GoogleConfig, ProxyConfig};
use gemini_proxy_service::startup::Application;
use std::time::Duration;

/// Model name used across tests.
pub const TEST_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Build a Google section pointing at a test upstream.
pub fn google_config(api_key: &str, api_base: String) -> GoogleConfig {
    GoogleConfig {
        api_key: api_key.to_string(),
        api_base,
        text_model: TEST_MODEL.to_string(),
    }
}

/// Spawn the application on a random port and return the port number.
///
/// The configuration is constructed directly so tests never mutate the
/// process environment.
pub async fn spawn_app(google: GoogleConfig) -> u16 {
    let config = ProxyConfig {
        common: CommonConfig { port: 0 },
        google,
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    port
}
