//! Provider Data Types
//!
//! The wire format of the passage text endpoint, the normalized response handed
//! to the resolver, and the DTOs of the verse lookup endpoint.

use serde::{Deserialize, Serialize};

/// Text the provider's original client substituted for a missing passage.
/// Only used when rendering a miss to API clients.
pub const PASSAGE_NOT_FOUND: &str = "Error: Passage not found";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("passage request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("passage provider answered with status {0}")]
    Status(reqwest::StatusCode),
}

/// Passage text for a reference, or the provider's "no such passage".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassageText {
    Found(String),
    NotFound,
}

impl PassageText {
    pub fn as_display(&self) -> &str {
        match self {
            PassageText::Found(text) => text,
            PassageText::NotFound => PASSAGE_NOT_FOUND,
        }
    }
}

/// Normalized provider answer. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub passages: PassageText,
    /// The query string as echoed back by the provider.
    pub reference: String,
}

impl From<PassageApiResponse> for ProviderResponse {
    fn from(api: PassageApiResponse) -> Self {
        let passages = match api.passages.into_iter().next() {
            Some(text) => PassageText::Found(text.trim().to_string()),
            None => PassageText::NotFound,
        };

        Self {
            passages,
            reference: api.query,
        }
    }
}

/// JSON body of the passage text endpoint (fields we read).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageApiResponse {
    #[serde(default)]
    pub passages: Vec<String>,
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct VerseLookupParams {
    pub reference: String,
    #[serde(default)]
    pub get_verse_num: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerseInfo {
    pub passages: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerseLookupResponse {
    pub info: VerseInfo,
}
