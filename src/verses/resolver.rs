use super::reference::{ReferenceKind, classify, expand_references, split_verses};
use super::store::VerseStore;
use crate::provider::client::PassageProvider;
use crate::provider::types::{PassageText, ProviderError};
use crate::storage::types::{StoreError, Verse};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Turns raw reference strings into stored verses.
pub struct ReferenceResolver {
    provider: Arc<dyn PassageProvider>,
    store: VerseStore,
}

impl ReferenceResolver {
    pub fn new(provider: Arc<dyn PassageProvider>, store: VerseStore) -> Self {
        Self { provider, store }
    }

    /// Resolves every reference in order, one provider round-trip each.
    ///
    /// References the provider does not know are skipped, so the result can be
    /// shorter than the input or empty. Transport faults and store constraint
    /// violations abort the whole call.
    pub async fn resolve_all(&self, raw_references: &[String]) -> Result<Vec<Verse>, ResolveError> {
        let mut verses = Vec::new();

        for raw in raw_references {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            self.resolve_one(raw, &mut verses).await?;
        }

        Ok(verses)
    }

    async fn resolve_one(&self, raw: &str, verses: &mut Vec<Verse>) -> Result<(), ResolveError> {
        let kind = classify(raw);
        if kind == ReferenceKind::Unparseable {
            tracing::warn!("Skipping reference {:?}: cannot read the verse range", raw);
            return Ok(());
        }

        let response = self.provider.fetch(raw, kind.is_range()).await?;

        let text = match response.passages {
            PassageText::Found(text) => text,
            PassageText::NotFound => {
                tracing::warn!("Skipping reference {:?}: passage not found", raw);
                return Ok(());
            }
        };

        if !kind.is_range() {
            verses.push(self.store.find_or_create(&response.reference, &text)?);
            return Ok(());
        }

        let segments = split_verses(&text);
        let references = expand_references(&kind, segments.len());
        tracing::debug!(
            "Range {:?} split into {} segments, {} references",
            raw,
            segments.len(),
            references.len()
        );

        for (reference, segment) in references.iter().zip(segments.iter()) {
            verses.push(self.store.find_or_create(reference, segment)?);
        }

        Ok(())
    }
}
