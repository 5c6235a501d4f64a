//! Search Service Module
//!
//! Full-text search over sets, backed by a secondary index that mirrors the store.
//!
//! ## Overview
//! Sets are mirrored into an index (`name` and `description` only). Writes reach the
//! index through an explicit post-commit call: the writing code snapshots the
//! touched rows into a `Changes` value and hands it to `IndexSynchronizer::after_commit`
//! once the store write succeeded. A failed index write is logged and left for the
//! next full reindex.
//!
//! ## Responsibilities
//! - **Tokenization**: Normalizing indexed text and query strings into words.
//! - **Indexing**: Upserting and removing documents in the configured backend.
//! - **Ranking**: Ordering hits and mapping index ids back to stored sets in rank order.
//! - **Fallback**: Substring matching against the store when no index is configured.
//!
//! ## Submodules
//! - **`engine`**: The query facade used by the HTTP layer.
//! - **`index`**: The `SearchIndex` trait and the in-process inverted index.
//! - **`elastic`**: Elasticsearch backend.
//! - **`sync`**: `Indexable`, `Changes` and the synchronizer.
//! - **`handlers`**: HTTP handlers for search and reindexing.
//! - **`tokenizer`**: Text normalization.
//! - **`types`**: Request and response DTOs.

pub mod elastic;
pub mod engine;
pub mod handlers;
pub mod index;
pub mod sync;
pub mod tokenizer;
pub mod types;
