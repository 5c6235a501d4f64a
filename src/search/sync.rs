use super::index::{IndexDocument, SearchIndex};
use crate::storage::types::Set;

use std::collections::BTreeMap;
use std::sync::Arc;

/// An entity mirrored into the search index.
pub trait Indexable {
    /// Name of the index holding this entity type.
    const INDEX: &'static str;

    fn id(&self) -> i64;

    /// Field name -> text for every searchable field.
    fn searchable_fields(&self) -> BTreeMap<String, String>;

    fn to_document(&self) -> IndexDocument {
        IndexDocument {
            id: self.id(),
            fields: self.searchable_fields(),
        }
    }
}

impl Indexable for Set {
    const INDEX: &'static str = "sets";

    fn id(&self) -> i64 {
        self.id
    }

    fn searchable_fields(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("name".to_string(), self.name.clone()),
            (
                "description".to_string(),
                self.description.clone().unwrap_or_default(),
            ),
        ])
    }
}

/// Entities touched by one unit of work, snapshotted before it is committed.
#[derive(Debug, Clone)]
pub struct Changes<T> {
    pub added: Vec<T>,
    pub updated: Vec<T>,
    pub deleted: Vec<T>,
}

impl<T> Default for Changes<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        }
    }
}

impl<T> Changes<T> {
    pub fn added(entity: T) -> Self {
        Self {
            added: vec![entity],
            ..Self::default()
        }
    }

    pub fn updated(entity: T) -> Self {
        Self {
            updated: vec![entity],
            ..Self::default()
        }
    }

    pub fn deleted(entities: Vec<T>) -> Self {
        Self {
            deleted: entities,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Pushes committed store writes into the search index.
///
/// With no index configured every call is a no-op.
#[derive(Clone, Default)]
pub struct IndexSynchronizer {
    index: Option<Arc<dyn SearchIndex>>,
}

impl IndexSynchronizer {
    pub fn new(index: Option<Arc<dyn SearchIndex>>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> Option<&Arc<dyn SearchIndex>> {
        self.index.as_ref()
    }

    /// Mirrors a committed unit of work: upserts for added and updated rows,
    /// removals for deleted ones.
    ///
    /// The store write has already happened, so index failures are logged and
    /// dropped. The index stays stale until the next `reindex_all`.
    pub async fn after_commit<T: Indexable>(&self, changes: Changes<T>) {
        let Some(index) = &self.index else {
            return;
        };

        for entity in changes.added.iter().chain(changes.updated.iter()) {
            if let Err(e) = index.add_to_index(T::INDEX, &entity.to_document()).await {
                tracing::warn!(
                    "Failed to index {} {}: {:#}",
                    T::INDEX,
                    entity.id(),
                    e
                );
            } else {
                tracing::debug!("Indexed {} {}", T::INDEX, entity.id());
            }
        }

        for entity in &changes.deleted {
            if let Err(e) = index.remove_from_index(T::INDEX, entity.id()).await {
                tracing::warn!(
                    "Failed to remove {} {} from index: {:#}",
                    T::INDEX,
                    entity.id(),
                    e
                );
            } else {
                tracing::debug!("Removed {} {} from index", T::INDEX, entity.id());
            }
        }
    }

    /// Upserts every given row. Used to bootstrap an empty index or repair
    /// drift; returns how many rows were pushed.
    ///
    /// Only adds and replaces. A document whose removal failed in
    /// `after_commit` stays in the index and keeps counting towards query
    /// totals until it is removed explicitly.
    pub async fn reindex_all<T: Indexable>(&self, rows: Vec<T>) -> anyhow::Result<usize> {
        let Some(index) = &self.index else {
            return Ok(0);
        };

        for row in &rows {
            index.add_to_index(T::INDEX, &row.to_document()).await?;
        }
        tracing::debug!("Reindexed {} {}", rows.len(), T::INDEX);
        Ok(rows.len())
    }
}
