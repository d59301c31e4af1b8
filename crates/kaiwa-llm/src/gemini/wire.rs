// Wire types for the Generative Language REST API.
//
// Payload building and reply extraction are pure functions here so they can
// be unit tested without a network.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::{ChatTurn, Role};

/// The endpoint's name for the assistant side of a conversation.
const MODEL_ROLE: &str = "model";

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Map our role to the endpoint's: `assistant` is spelled `model` on the wire.
pub fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => MODEL_ROLE,
    }
}

/// Build the request body: every history turn becomes one ordered content
/// entry. The full history is replayed on each call; no truncation or
/// windowing happens at this layer.
pub fn build_request(history: &[ChatTurn]) -> GenerateContentRequest {
    let contents = history
        .iter()
        .map(|turn| Content {
            role: wire_role(turn.role).to_string(),
            parts: vec![Part {
                text: turn.content.clone(),
            }],
        })
        .collect();

    GenerateContentRequest { contents }
}

/// Pull the plain-text reply out of a response: the text parts of the first
/// candidate, concatenated. A response without any text is an error.
pub fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::EmptyReply);
    }
    Ok(text)
}
