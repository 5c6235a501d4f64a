//! Set Data Types
//!
//! Request and response bodies of the set endpoints.

use crate::pagination::page_neighbours;
use crate::storage::types::{Page, Set, SetId, UserId, Verse};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of the create, edit and copy endpoints.
///
/// `refs` holds the raw references typed into the form, one per field.
#[derive(Debug, Clone, Deserialize)]
pub struct SetForm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub refs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSummary {
    pub id: SetId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<&Set> for SetSummary {
    fn from(set: &Set) -> Self {
        Self {
            id: set.id,
            name: set.name.clone(),
            description: set.description.clone(),
            owner_id: set.owner_id,
            created_at: set.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetDetail {
    #[serde(flatten)]
    pub set: SetSummary,
    pub verses: Vec<Verse>,
    pub is_owner: bool,
    pub is_favorite: bool,
}

/// One flash card of the study views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub reference: String,
    pub verse: String,
}

impl From<Verse> for Card {
    fn from(verse: Verse) -> Self {
        Self {
            id: verse.id,
            reference: verse.reference,
            verse: verse.text,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardsResponse {
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

impl FavoriteToggle {
    pub fn message(self) -> &'static str {
        match self {
            FavoriteToggle::Added => "Added",
            FavoriteToggle::Removed => "Removed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

/// A page of sets with links to its neighbours.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetListResponse {
    pub sets: Vec<SetSummary>,
    pub total: usize,
    pub page: usize,
    pub next_url: Option<String>,
    pub prev_url: Option<String>,
}

impl SetListResponse {
    pub fn from_page(path: &str, page: Page<Set>) -> Self {
        let (next_url, prev_url) = page_neighbours(path, &page);
        Self {
            sets: page.items.iter().map(SetSummary::from).collect(),
            total: page.total,
            page: page.page,
            next_url,
            prev_url,
        }
    }
}
