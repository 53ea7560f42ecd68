/// LLM Client: the single point of entry for all Gemini API calls.
///
/// No other module may call the Generative Language API directly. Callers
/// depend on the `TextGenerator` trait, which `LlmClient` implements.
///
/// One request per call: retry policy, if any, belongs to the caller.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all résumé analysis calls. Hardcoded to prevent drift.
pub const MODEL: &str = "gemini-1.5-flash";
/// Low randomness keeps extraction output stable across uploads.
const TEMPERATURE: f32 = 0.1;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that turns a single-turn prompt into raw model text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it produced any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Wraps the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_base: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, MODEL)
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let llm_response: GenerateContentResponse = serde_json::from_slice(&body)?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.call(prompt).await?.text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    /// Serves `app` on an ephemeral port and returns a client pointed at it.
    async fn client_for(app: Router, timeout: Duration) -> LlmClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        LlmClient::new("test-key".into(), format!("http://{addr}/v1beta"), timeout).unwrap()
    }

    #[test]
    fn test_request_uses_single_user_turn_and_low_temperature() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        let temperature = value["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": " 1}" }] } },
                { "content": { "role": "model", "parts": [{ "text": "ignored" }] } }
            ],
            "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 4 }
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = LlmClient::new(
            "key".into(),
            "http://localhost:9999/v1beta/".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            format!("http://localhost:9999/v1beta/models/{MODEL}:generateContent")
        );
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let app = Router::new().fallback(|| async {
            Json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "{\"ok\": true}" }] } }]
            }))
        });
        let client = client_for(app, Duration::from_secs(5)).await;
        assert_eq!(client.generate("prompt").await.unwrap(), "{\"ok\": true}");
    }

    #[tokio::test]
    async fn test_error_status_surfaces_api_message() {
        let app = Router::new().fallback(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": { "code": 429, "message": "quota" } })),
            )
                .into_response()
        });
        let client = client_for(app, Duration::from_secs(5)).await;
        match client.generate("prompt").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "quota");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_content() {
        let app = Router::new().fallback(|| async { Json(json!({ "candidates": [] })) });
        let client = client_for(app, Duration::from_secs(5)).await;
        assert!(matches!(
            client.generate("prompt").await,
            Err(LlmError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_decode_error() {
        let app = Router::new().fallback(|| async { "<html>gateway</html>" });
        let client = client_for(app, Duration::from_secs(5)).await;
        assert!(matches!(
            client.generate("prompt").await,
            Err(LlmError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let app = Router::new().fallback(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "candidates": [] }))
        });
        let client = client_for(app, Duration::from_millis(100)).await;
        match client.generate("prompt").await {
            Err(LlmError::Http(e)) => assert!(e.is_timeout(), "got {e:?}"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
