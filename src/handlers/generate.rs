//! The generate endpoint: one prompt in, one text (or error) out.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::providers::GenerationOptions;
use crate::startup::AppState;

/// Inbound request body. All fields are optional; a missing prompt is
/// forwarded upstream as an empty prompt rather than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub use_grounding: bool,
    #[serde(default)]
    pub system_instruction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Forward a prompt to the configured text provider.
///
/// The body is taken raw so that malformed JSON is an explicit, typed
/// failure rather than an extractor rejection with a framework-shaped body.
#[tracing::instrument(skip(state, body))]
pub async fn generate_text(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    let request: GenerateRequest = serde_json::from_str(&body).map_err(|e| {
        tracing::warn!("Rejected malformed request body: {}", e);
        AppError::InvalidBody(e.to_string())
    })?;

    let options = GenerationOptions {
        use_grounding: request.use_grounding,
        system_instruction: request.system_instruction,
    };

    let text = state
        .text_provider
        .generate(&request.prompt, &options)
        .await?;

    Ok((StatusCode::OK, Json(GenerateResponse { text })))
}

/// Fixed 405 for any non-POST method on the generate route.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

#[cfg(test)]
mod tests {
    use crate::config::{CommonConfig, GoogleConfig, ProxyConfig};
    use crate::services::providers::mock::MockTextProvider;
    use crate::startup::{router, AppState};
    use axum::body::{to_bytes, Body};
    use http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(provider_enabled: bool) -> AppState {
        AppState {
            config: ProxyConfig {
                common: CommonConfig { port: 0 },
                google: GoogleConfig {
                    api_key: "test-key".to_string(),
                    api_base: "http://localhost:0".to_string(),
                    text_model: "gemini-2.5-flash-preview-05-20".to_string(),
                },
            },
            text_provider: Arc::new(MockTextProvider::new(provider_enabled)),
        }
    }

    async fn body_string(body: Body) -> String {
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn generate_relays_provider_text_as_json() {
        let app = router(state(true));

        let response = app
            .oneshot(
                Request::post("/generate")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"prompt":"ping"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response.into_body()).await,
            r#"{"text":"Mock response for: ping"}"#
        );
    }

    #[tokio::test]
    async fn unconfigured_provider_maps_to_missing_key_response() {
        let app = router(state(false));

        let response = app
            .oneshot(
                Request::post("/generate")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"prompt":"ping"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response.into_body()).await,
            "API key is not configured."
        );
    }

    #[tokio::test]
    async fn get_on_generate_route_is_method_not_allowed() {
        let app = router(state(true));

        let response = app
            .oneshot(Request::get("/generate").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_string(response.into_body()).await, "Method Not Allowed");
    }
}
