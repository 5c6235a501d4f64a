use super::sync::{IndexSynchronizer, Indexable};
use crate::storage::memory::Database;
use crate::storage::types::Set;

use std::collections::HashMap;
use std::sync::Arc;

/// Set search over the configured index, or over the store when there is none.
pub struct SearchEngine {
    db: Arc<Database>,
    sync: IndexSynchronizer,
}

impl SearchEngine {
    pub fn new(db: Arc<Database>, sync: IndexSynchronizer) -> Self {
        Self { db, sync }
    }

    pub fn synchronizer(&self) -> &IndexSynchronizer {
        &self.sync
    }

    /// Pushes every stored set into the index.
    pub async fn reindex_sets(&self) -> anyhow::Result<usize> {
        self.sync.reindex_all(self.db.all_sets()).await
    }

    /// Returns one page of matching sets in rank order, plus the match total.
    ///
    /// With an index, the index is rebuilt first so results reflect every
    /// committed write. Without one, every case-insensitive substring match on
    /// name or description is returned regardless of `page`, and the total is
    /// the number of those matches.
    pub async fn search_sets(
        &self,
        term: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<(Vec<Set>, usize)> {
        let Some(index) = self.sync.index() else {
            let matches = substring_matches(self.db.all_sets(), term);
            let total = matches.len();
            return Ok((matches, total));
        };

        self.reindex_sets().await?;

        let hits = index
            .query_index(Set::INDEX, term, page.max(1), per_page)
            .await?;
        tracing::debug!(
            "Search {:?} page {}: {} of {} hits",
            term,
            page,
            hits.ids.len(),
            hits.total
        );

        if hits.total == 0 {
            return Ok((Vec::new(), 0));
        }

        let sets = rank_order(self.db.sets_by_ids(&hits.ids), &hits.ids);
        Ok((sets, hits.total))
    }
}

/// Reorders fetched rows to follow `ranked_ids`. Rows whose id is not ranked go last.
pub fn rank_order(mut sets: Vec<Set>, ranked_ids: &[i64]) -> Vec<Set> {
    let position: HashMap<i64, usize> = ranked_ids
        .iter()
        .enumerate()
        .map(|(rank, id)| (*id, rank))
        .collect();

    sets.sort_by_key(|set| position.get(&set.id).copied().unwrap_or(usize::MAX));
    sets
}

fn substring_matches(sets: Vec<Set>, term: &str) -> Vec<Set> {
    let needle = term.to_lowercase();
    sets.into_iter()
        .filter(|set| {
            set.name.to_lowercase().contains(&needle)
                || set
                    .description
                    .as_deref()
                    .is_some_and(|description| description.to_lowercase().contains(&needle))
        })
        .collect()
}
