//! Storage Row Types
//!
//! One struct per table of the relational store, plus the insert payloads and
//! the error type returned by constraint checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type SetId = i64;
pub type VerseId = i64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,

    /// Unique constraint on `verses.reference`.
    #[error("a verse with reference {0:?} already exists")]
    DuplicateVerse(String),

    /// Unique constraint on `users.username`.
    #[error("username {0:?} is already taken")]
    DuplicateUsername(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub is_admin: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// A resolved verse. Shared by every set that lists it; the text is written once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: VerseId,
    pub reference: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub id: SetId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSet {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
}

/// One page of a listing plus the size of the whole listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    /// Cuts page `page` (1-based) out of an already ordered listing.
    pub fn from_vec(rows: Vec<T>, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let total = rows.len();
        let items = rows
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        Self {
            items,
            total,
            page,
            per_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.total > self.page.saturating_mul(self.per_page)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
