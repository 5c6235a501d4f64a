use super::types::*;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-process relational store.
///
/// Each table is a `DashMap` keyed by its integer primary key. Unique columns
/// (`users.username`, `verses.reference`) carry a secondary map that is
/// claimed through the entry API, so a second insert of the same value fails
/// instead of producing a duplicate row.
pub struct Database {
    users: DashMap<UserId, User>,
    usernames: DashMap<String, UserId>,
    sets: DashMap<SetId, Set>,
    verses: DashMap<VerseId, Verse>,
    verse_references: DashMap<String, VerseId>,
    /// Ordered verse ids of each set (the `sets_verses` association).
    set_verses: DashMap<SetId, Vec<VerseId>>,
    /// Favorited set ids per user, in the order they were added.
    favorites: DashMap<UserId, Vec<SetId>>,
    next_user_id: AtomicI64,
    next_set_id: AtomicI64,
    next_verse_id: AtomicI64,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            sets: DashMap::new(),
            verses: DashMap::new(),
            verse_references: DashMap::new(),
            set_verses: DashMap::new(),
            favorites: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_set_id: AtomicI64::new(1),
            next_verse_id: AtomicI64::new(1),
        }
    }

    fn next_id(counter: &AtomicI64) -> i64 {
        counter.fetch_add(1, Ordering::SeqCst)
    }

    // --- users ---

    pub fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        match self.usernames.entry(new_user.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateUsername(new_user.username)),
            Entry::Vacant(slot) => {
                let id = Self::next_id(&self.next_user_id);
                let user = User {
                    id,
                    username: new_user.username,
                    first_name: new_user.first_name,
                    last_name: new_user.last_name,
                    email: new_user.email,
                    bio: None,
                    is_admin: new_user.is_admin,
                };
                self.users.insert(id, user.clone());
                slot.insert(id);
                tracing::debug!("Inserted user {} ({})", id, user.username);
                Ok(user)
            }
        }
    }

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|user| user.clone())
    }

    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        let id = *self.usernames.get(username)?;
        self.get_user(id)
    }

    pub fn email_in_use(&self, email: &str) -> bool {
        self.users.iter().any(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub fn update_user(&self, user: User) -> Result<User, StoreError> {
        let current = self.get_user(user.id).ok_or(StoreError::NotFound)?;

        if current.username != user.username {
            match self.usernames.entry(user.username.clone()) {
                Entry::Occupied(_) => return Err(StoreError::DuplicateUsername(user.username)),
                Entry::Vacant(slot) => {
                    slot.insert(user.id);
                }
            }
            self.usernames.remove(&current.username);
        }

        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Removes a user together with their sets and favorites. Returns the
    /// deleted sets so the caller can drop them from the search index.
    pub fn delete_user(&self, id: UserId) -> Result<Vec<Set>, StoreError> {
        let (_, user) = self.users.remove(&id).ok_or(StoreError::NotFound)?;
        self.usernames.remove(&user.username);
        self.favorites.remove(&id);

        let mut deleted = Vec::new();
        for set in self.sets_by_owner(id) {
            deleted.push(self.delete_set(set.id)?);
        }
        Ok(deleted)
    }

    // --- verses ---

    pub fn get_verse(&self, id: VerseId) -> Option<Verse> {
        self.verses.get(&id).map(|verse| verse.clone())
    }

    pub fn find_verse_by_reference(&self, reference: &str) -> Option<Verse> {
        let id = *self.verse_references.get(reference)?;
        self.get_verse(id)
    }

    pub fn insert_verse(&self, reference: &str, text: &str) -> Result<Verse, StoreError> {
        match self.verse_references.entry(reference.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateVerse(reference.to_string())),
            Entry::Vacant(slot) => {
                let id = Self::next_id(&self.next_verse_id);
                let verse = Verse {
                    id,
                    reference: reference.to_string(),
                    text: text.to_string(),
                };
                self.verses.insert(id, verse.clone());
                slot.insert(id);
                Ok(verse)
            }
        }
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    // --- sets ---

    pub fn insert_set(&self, new_set: NewSet) -> Set {
        let id = Self::next_id(&self.next_set_id);
        let set = Set {
            id,
            name: new_set.name,
            description: new_set.description,
            owner_id: new_set.owner_id,
            created_at: Utc::now(),
        };
        self.sets.insert(id, set.clone());
        self.set_verses.insert(id, Vec::new());
        tracing::debug!("Inserted set {} owned by {}", id, set.owner_id);
        set
    }

    pub fn get_set(&self, id: SetId) -> Option<Set> {
        self.sets.get(&id).map(|set| set.clone())
    }

    pub fn update_set(&self, set: Set) -> Result<Set, StoreError> {
        match self.sets.get_mut(&set.id) {
            Some(mut row) => {
                *row = set.clone();
                Ok(set)
            }
            None => Err(StoreError::NotFound),
        }
    }

    /// Deletes a set with its verse links and every favorite pointing at it.
    /// The verses themselves stay.
    pub fn delete_set(&self, id: SetId) -> Result<Set, StoreError> {
        let (_, set) = self.sets.remove(&id).ok_or(StoreError::NotFound)?;
        self.set_verses.remove(&id);
        for mut favorites in self.favorites.iter_mut() {
            favorites.retain(|set_id| *set_id != id);
        }
        tracing::debug!("Deleted set {}", id);
        Ok(set)
    }

    /// Every set, ordered by id.
    pub fn all_sets(&self) -> Vec<Set> {
        let mut sets: Vec<Set> = self.sets.iter().map(|entry| entry.value().clone()).collect();
        sets.sort_by_key(|set| set.id);
        sets
    }

    /// Id-membership lookup. Rows come back in id order, not in the order of `ids`.
    pub fn sets_by_ids(&self, ids: &[SetId]) -> Vec<Set> {
        let mut sets: Vec<Set> = ids.iter().filter_map(|id| self.get_set(*id)).collect();
        sets.sort_by_key(|set| set.id);
        sets.dedup_by_key(|set| set.id);
        sets
    }

    pub fn sets_by_owner(&self, owner_id: UserId) -> Vec<Set> {
        let mut sets: Vec<Set> = self
            .sets
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        sets.sort_by_key(|set| set.id);
        sets
    }

    /// Newest first; ids break ties between sets created in the same instant.
    pub fn recent_sets(&self) -> Vec<Set> {
        let mut sets = self.all_sets();
        sets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        sets
    }

    pub fn set_verses(&self, set_id: SetId) -> Vec<Verse> {
        let ids = match self.set_verses.get(&set_id) {
            Some(ids) => ids.clone(),
            None => return Vec::new(),
        };
        ids.into_iter().filter_map(|id| self.get_verse(id)).collect()
    }

    /// Replaces the whole verse list of a set, keeping the given order.
    pub fn replace_set_verses(
        &self,
        set_id: SetId,
        verse_ids: Vec<VerseId>,
    ) -> Result<(), StoreError> {
        if !self.sets.contains_key(&set_id) {
            return Err(StoreError::NotFound);
        }
        self.set_verses.insert(set_id, verse_ids);
        Ok(())
    }

    // --- favorites ---

    pub fn is_favorite(&self, user_id: UserId, set_id: SetId) -> bool {
        self.favorites
            .get(&user_id)
            .map(|favorites| favorites.contains(&set_id))
            .unwrap_or(false)
    }

    /// Flips the favorite flag of `(user_id, set_id)` and returns the new state.
    pub fn toggle_favorite(&self, user_id: UserId, set_id: SetId) -> Result<bool, StoreError> {
        if !self.sets.contains_key(&set_id) {
            return Err(StoreError::NotFound);
        }

        let mut favorites = self.favorites.entry(user_id).or_default();
        if let Some(position) = favorites.iter().position(|id| *id == set_id) {
            favorites.remove(position);
            Ok(false)
        } else {
            favorites.push(set_id);
            Ok(true)
        }
    }

    /// The user's favorited sets, ordered by id.
    pub fn favorite_sets(&self, user_id: UserId) -> Vec<Set> {
        let ids = match self.favorites.get(&user_id) {
            Some(ids) => ids.clone(),
            None => return Vec::new(),
        };
        self.sets_by_ids(&ids)
    }
}
