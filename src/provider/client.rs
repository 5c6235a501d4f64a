use super::types::{PassageApiResponse, ProviderError, ProviderResponse};

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

/// Source of passage text for a reference string.
///
/// `include_verse_numbers` asks for `[n]` markers before each verse, which the
/// resolver needs to split a multi-verse passage.
#[async_trait]
pub trait PassageProvider: Send + Sync {
    async fn fetch(
        &self,
        passage: &str,
        include_verse_numbers: bool,
    ) -> Result<ProviderResponse, ProviderError>;
}

/// HTTP client for the ESV passage text endpoint.
///
/// One request per call. No retries and no timeout: a slow provider holds the
/// calling request for as long as it takes.
pub struct EsvClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl EsvClient {
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    pub fn with_client(http_client: reqwest::Client, api_url: &str, api_key: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Query string of a passage request: the reference plus plain-text
    /// formatting (no headings, footnotes, copyright, references or indentation).
    pub fn query_params(passage: &str, include_verse_numbers: bool) -> Vec<(&'static str, String)> {
        vec![
            ("q", passage.to_string()),
            ("include-headings", "false".to_string()),
            ("include-footnotes", "false".to_string()),
            ("include-verse-numbers", include_verse_numbers.to_string()),
            ("include-short-copyright", "false".to_string()),
            ("include-passage-references", "false".to_string()),
            ("indent-poetry", "false".to_string()),
            ("indent-poetry-lines", "0".to_string()),
            ("indent-paragraphs", "0".to_string()),
            ("indent-declares", "0".to_string()),
            ("indent-psalm-doxology", "0".to_string()),
        ]
    }
}

#[async_trait]
impl PassageProvider for EsvClient {
    async fn fetch(
        &self,
        passage: &str,
        include_verse_numbers: bool,
    ) -> Result<ProviderResponse, ProviderError> {
        tracing::debug!(
            "Fetching passage {:?} (verse numbers: {})",
            passage,
            include_verse_numbers
        );

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&Self::query_params(passage, include_verse_numbers))
            .header(AUTHORIZATION, format!("Token {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        let body: PassageApiResponse = response.json().await?;
        Ok(body.into())
    }
}
