use crate::storage::memory::Database;
use crate::storage::types::{StoreError, Verse};

use std::sync::Arc;

/// Find-or-create cache of resolved verses, keyed by exact reference.
#[derive(Clone)]
pub struct VerseStore {
    db: Arc<Database>,
}

impl VerseStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Returns the stored verse for `reference`, creating it with `text` if absent.
    ///
    /// First write wins: an existing verse is returned unchanged even when
    /// `text` differs. Two concurrent calls for the same unseen reference are
    /// not serialized here; the loser gets `StoreError::DuplicateVerse` from the
    /// table's unique constraint.
    pub fn find_or_create(&self, reference: &str, text: &str) -> Result<Verse, StoreError> {
        if let Some(verse) = self.db.find_verse_by_reference(reference) {
            return Ok(verse);
        }

        let verse = self.db.insert_verse(reference, text)?;
        tracing::debug!("Cached new verse {} ({})", verse.id, verse.reference);
        Ok(verse)
    }
}
