// Gemini client (HTTP direct, no SDK)

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::error::{LlmError, Result};
use crate::gemini::wire::{
    build_request, extract_text, ErrorResponse, GenerateContentResponse, ListModelsResponse,
};
use crate::traits::TextGenerator;
use crate::types::ChatTurn;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Client for the Generative Language API.
///
/// Holds a pooled HTTP client with the API key installed as a default
/// header; the model identifier (e.g. `models/gemini-2.5-flash-lite`)
/// is fixed at construction.
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client for the given API key and model identifier.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let model = model.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key_value = HeaderValue::from_str(&api_key)
            .map_err(|_| LlmError::Config("API key contains invalid header characters".into()))?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;

        tracing::info!(model = %model, "Gemini client initialized");

        Ok(Self {
            http_client,
            base_url: GEMINI_API_BASE.to_string(),
            model,
        })
    }

    /// List the model identifiers the endpoint offers.
    ///
    /// Diagnostic only; never called on the message path.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/v1beta/models", self.base_url);
        let response = self.http_client.get(&url).send().await?;
        let response = Self::check_status(response).await?;

        let body: ListModelsResponse = response.json().await?;
        Ok(body.models.into_iter().map(|m| m.name).collect())
    }

    async fn post_generate(&self, history: &[ChatTurn]) -> Result<String> {
        let url = format!(
            "{}/v1beta/{}:generateContent",
            self.base_url, self.model
        );
        let payload = build_request(history);

        tracing::debug!(turns = history.len(), model = %self.model, "generating response");

        let response = self.http_client.post(&url).json(&payload).send().await?;
        let response = Self::check_status(response).await?;

        let body: GenerateContentResponse = response.json().await?;
        extract_text(body)
    }

    /// Turn a non-success HTTP status into an endpoint error carrying the
    /// message from the error body when one is present.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse { error: Some(detail) }) => detail.message,
            _ => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        tracing::error!(status = status.as_u16(), %message, "generation endpoint error");
        Err(LlmError::Endpoint {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, history: &[ChatTurn]) -> Result<String> {
        self.post_generate(history).await
    }
}
