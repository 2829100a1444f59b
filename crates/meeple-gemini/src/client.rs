// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! One request per call. Failures are reported immediately and never retried;
//! the caller bounds the total wait.

use std::time::Duration;

use meeple_core::MeepleError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Default base URL for the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client that authenticates every request with `api_key`.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, MeepleError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| MeepleError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| MeepleError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The endpoint URL for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    /// Sends one `generateContent` request and decodes the full response.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, MeepleError> {
        let url = self.endpoint(model);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| MeepleError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = response.text().await.map_err(|e| MeepleError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({} {}): {}",
                    api_err.error.code,
                    api_err.error.status.as_deref().unwrap_or("UNKNOWN"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(MeepleError::Provider {
                message,
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| MeepleError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5},
            "modelVersion": "gemini-2.5-flash"
        })
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("hola")))
            .mount(&server)
            .await;

        let client = GeminiClient::new("test-key", &server.uri()).unwrap();
        let resp = client
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::from_prompt("hi"))
            .await
            .unwrap();
        assert_eq!(resp.text().as_deref(), Some("hola"));
    }

    #[tokio::test]
    async fn client_sends_key_header_and_prompt_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "¿un juego?"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new("test-key", &server.uri()).unwrap();
        let result = client
            .generate_content(
                "gemini-2.5-flash",
                &GenerateContentRequest::from_prompt("¿un juego?"),
            )
            .await;
        assert!(result.is_ok(), "headers and body should match: {result:?}");
    }

    #[tokio::test]
    async fn api_error_is_reported_without_retry() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new("test-key", &server.uri()).unwrap();
        let err = client
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::from_prompt("x"))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("UNAVAILABLE"), "got: {msg}");
        assert!(msg.contains("overloaded"), "got: {msg}");
    }

    #[tokio::test]
    async fn non_json_error_body_is_included() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = GeminiClient::new("test-key", &server.uri()).unwrap();
        let err = client
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::from_prompt("x"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad gateway"), "got: {err}");
    }

    #[tokio::test]
    async fn unparseable_success_body_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = GeminiClient::new("test-key", &server.uri()).unwrap();
        let err = client
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::from_prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, MeepleError::Provider { .. }));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("k", "http://localhost:1234/v1beta/").unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn invalid_key_characters_are_config_error() {
        let err = GeminiClient::new("bad\nkey", DEFAULT_BASE_URL).unwrap_err();
        assert!(matches!(err, MeepleError::Config(_)));
    }
}
