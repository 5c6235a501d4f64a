use super::tokenizer::{tokenize_query, tokenize_text};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Denormalized copy of an entity's searchable fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDocument {
    pub id: i64,
    pub fields: BTreeMap<String, String>,
}

/// Ranked ids for one page of a query, plus the number of matches overall.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexHits {
    pub ids: Vec<i64>,
    pub total: usize,
}

/// Secondary full-text store mirroring searchable entities.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Inserts or replaces the document with `document.id`.
    async fn add_to_index(&self, index: &str, document: &IndexDocument) -> anyhow::Result<()>;

    async fn remove_from_index(&self, index: &str, id: i64) -> anyhow::Result<()>;

    /// `page` is 1-based. Ids come back in rank order.
    async fn query_index(
        &self,
        index: &str,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<IndexHits>;
}

#[derive(Default)]
struct InvertedIndex {
    /// token -> ids of documents containing it
    postings: HashMap<String, HashSet<i64>>,
    /// id -> tokens it was indexed under, for replacement and removal
    documents: HashMap<i64, HashSet<String>>,
}

impl InvertedIndex {
    fn remove(&mut self, id: i64) {
        let Some(tokens) = self.documents.remove(&id) else {
            return;
        };
        for token in tokens {
            if let Some(ids) = self.postings.get_mut(&token) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.postings.remove(&token);
                }
            }
        }
    }

    fn insert(&mut self, document: &IndexDocument) {
        self.remove(document.id);

        let mut tokens = HashSet::new();
        for value in document.fields.values() {
            tokens.extend(tokenize_text(value));
        }
        for token in &tokens {
            self.postings
                .entry(token.clone())
                .or_default()
                .insert(document.id);
        }
        self.documents.insert(document.id, tokens);
    }

    /// Scores each document by how many distinct query words it contains.
    fn rank(&self, query: &str) -> Vec<(i64, usize)> {
        let mut scores: HashMap<i64, usize> = HashMap::new();
        for token in tokenize_query(query) {
            if let Some(ids) = self.postings.get(&token) {
                for id in ids {
                    scores
                        .entry(*id)
                        .and_modify(|score| *score += 1)
                        .or_insert(1);
                }
            }
        }

        let mut ranked: Vec<(i64, usize)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

/// In-process inverted index, one per index name.
#[derive(Default)]
pub struct MemoryIndex {
    indexes: DashMap<String, InvertedIndex>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self, index: &str) -> usize {
        self.indexes
            .get(index)
            .map(|inverted| inverted.documents.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl SearchIndex for MemoryIndex {
    async fn add_to_index(&self, index: &str, document: &IndexDocument) -> anyhow::Result<()> {
        self.indexes
            .entry(index.to_string())
            .or_default()
            .insert(document);
        Ok(())
    }

    async fn remove_from_index(&self, index: &str, id: i64) -> anyhow::Result<()> {
        if let Some(mut inverted) = self.indexes.get_mut(index) {
            inverted.remove(id);
        }
        Ok(())
    }

    async fn query_index(
        &self,
        index: &str,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<IndexHits> {
        let ranked = match self.indexes.get(index) {
            Some(inverted) => inverted.rank(query),
            None => return Ok(IndexHits::default()),
        };

        let total = ranked.len();
        let ids = ranked
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(per_page))
            .take(per_page)
            .map(|(id, _)| id)
            .collect();

        Ok(IndexHits { ids, total })
    }
}
