use super::types::{FavoriteToggle, SetDetail, SetForm, SetSummary};
use crate::error::AppError;
use crate::search::sync::{Changes, IndexSynchronizer};
use crate::storage::memory::Database;
use crate::storage::types::{NewSet, Page, Set, SetId, User, Verse};
use crate::verses::resolver::ReferenceResolver;

use std::sync::Arc;

pub const NO_VALID_REFERENCES: &str =
    "Please make sure to include at least 1 valid verse reference";
pub const NAME_LENGTH: &str = "Name must be between 1 and 50 characters";
pub const NOT_YOUR_SET: &str = "You cannot delete someone else's set!";

const MAX_NAME_CHARS: usize = 50;

/// Set writes and reads. Every write is followed by an explicit index sync.
pub struct SetService {
    db: Arc<Database>,
    resolver: ReferenceResolver,
    sync: IndexSynchronizer,
}

impl SetService {
    pub fn new(db: Arc<Database>, resolver: ReferenceResolver, sync: IndexSynchronizer) -> Self {
        Self { db, resolver, sync }
    }

    /// Validates the form fields, then resolves its references.
    ///
    /// An empty resolution means none of the references were usable, which is
    /// reported against the `name` field like the other form errors.
    async fn resolve_form(&self, form: &SetForm) -> Result<Vec<Verse>, AppError> {
        let name_chars = form.name.trim().chars().count();
        if name_chars == 0 || name_chars > MAX_NAME_CHARS {
            return Err(AppError::validation("name", NAME_LENGTH));
        }

        let verses = self.resolver.resolve_all(&form.refs).await?;
        if verses.is_empty() {
            tracing::info!("Rejected set form {:?}: no valid references", form.name);
            return Err(AppError::validation("name", NO_VALID_REFERENCES));
        }
        Ok(verses)
    }

    fn existing(&self, set_id: SetId) -> Result<Set, AppError> {
        self.db.get_set(set_id).ok_or(AppError::NotFound)
    }

    fn store_new(&self, owner: &User, form: SetForm, verses: &[Verse]) -> Result<Set, AppError> {
        let set = self.db.insert_set(NewSet {
            name: form.name.trim().to_string(),
            description: clean_description(form.description),
            owner_id: owner.id,
        });
        self.db
            .replace_set_verses(set.id, verses.iter().map(|verse| verse.id).collect())?;
        Ok(set)
    }

    pub async fn create_set(&self, owner: &User, form: SetForm) -> Result<Set, AppError> {
        let verses = self.resolve_form(&form).await?;
        let set = self.store_new(owner, form, &verses)?;

        tracing::info!(
            "User {} created set {} with {} verses",
            owner.id,
            set.id,
            verses.len()
        );
        self.sync.after_commit(Changes::added(set.clone())).await;
        Ok(set)
    }

    /// Owner-only. Replaces name, description and the whole verse list.
    pub async fn edit_set(&self, user: &User, set_id: SetId, form: SetForm) -> Result<Set, AppError> {
        let mut set = self.existing(set_id)?;
        if set.owner_id != user.id {
            return Err(AppError::NotFound);
        }

        let verses = self.resolve_form(&form).await?;

        set.name = form.name.trim().to_string();
        set.description = clean_description(form.description);
        let set = self.db.update_set(set)?;
        self.db
            .replace_set_verses(set.id, verses.iter().map(|verse| verse.id).collect())?;

        tracing::info!("User {} edited set {}", user.id, set.id);
        self.sync.after_commit(Changes::updated(set.clone())).await;
        Ok(set)
    }

    /// Copies someone else's set into a new set owned by `user`, taking the
    /// contents from the submitted form.
    pub async fn copy_set(&self, user: &User, set_id: SetId, form: SetForm) -> Result<Set, AppError> {
        let source = self.existing(set_id)?;
        if source.owner_id == user.id {
            return Err(AppError::NotFound);
        }

        let verses = self.resolve_form(&form).await?;
        let set = self.store_new(user, form, &verses)?;

        tracing::info!("User {} copied set {} into {}", user.id, source.id, set.id);
        self.sync.after_commit(Changes::added(set.clone())).await;
        Ok(set)
    }

    pub async fn delete_set(&self, user: &User, set_id: SetId) -> Result<Set, AppError> {
        let set = self.existing(set_id)?;
        if set.owner_id != user.id {
            return Err(AppError::Forbidden(NOT_YOUR_SET.to_string()));
        }

        let set = self.db.delete_set(set.id)?;

        tracing::info!("User {} deleted set {}", user.id, set.id);
        self.sync.after_commit(Changes::deleted(vec![set.clone()])).await;
        Ok(set)
    }

    pub fn toggle_favorite(&self, user: &User, set_id: SetId) -> Result<FavoriteToggle, AppError> {
        let toggle = if self.db.toggle_favorite(user.id, set_id)? {
            FavoriteToggle::Added
        } else {
            FavoriteToggle::Removed
        };
        tracing::debug!("User {} favorite {}: {:?}", user.id, set_id, toggle);
        Ok(toggle)
    }

    pub fn set_detail(&self, set_id: SetId, viewer: Option<&User>) -> Result<SetDetail, AppError> {
        let set = self.existing(set_id)?;
        let (is_owner, is_favorite) = match viewer {
            Some(user) => (set.owner_id == user.id, self.db.is_favorite(user.id, set.id)),
            None => (false, false),
        };

        Ok(SetDetail {
            verses: self.db.set_verses(set.id),
            set: SetSummary::from(&set),
            is_owner,
            is_favorite,
        })
    }

    /// The set's verses in set order.
    pub fn verses(&self, set_id: SetId) -> Result<Vec<Verse>, AppError> {
        let set = self.existing(set_id)?;
        Ok(self.db.set_verses(set.id))
    }

    /// Most recent sets first.
    pub fn explore(&self, page: usize, per_page: usize) -> Page<Set> {
        Page::from_vec(self.db.recent_sets(), page, per_page)
    }
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
