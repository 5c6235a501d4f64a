//! Bible Verse Memorization Service Library
//!
//! This library crate defines the modules behind the `mtword` binary (`main.rs`).
//!
//! ## Architecture Modules
//! - **`provider`**: Client for the external scripture-text API. A reference the
//!   provider does not know is a normal `NotFound` answer, not an error.
//! - **`verses`**: Reference resolution. Classifies raw references (single verse,
//!   verse range, bare chapter), splits range text into verses and caches each
//!   verse through a find-or-create store.
//! - **`search`**: The set search index: backends, the post-commit synchronizer and
//!   the query engine with its substring fallback.
//! - **`sets`**: Set creation, editing, copying, deletion and favorites.
//! - **`users`**: Registration, profiles and the acting-user extractor.
//! - **`storage`**: The in-process relational table store.

pub mod app;
pub mod config;
pub mod error;
pub mod pagination;
pub mod provider;
pub mod search;
pub mod sets;
pub mod storage;
pub mod users;
pub mod verses;

#[cfg(test)]
pub mod testing;
