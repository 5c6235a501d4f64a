//! Relational Storage Module
//!
//! The single-process table store behind every other subsystem.
//!
//! ## Tables
//! - **`users`**: account rows, unique by `username`.
//! - **`sets`**: named verse collections, each owned by one user.
//! - **`verses`**: resolved verse text, unique by `reference` and shared across sets.
//! - **`sets_verses`**: the ordered many-to-many link between sets and verses.
//! - **`favorites`**: `(user, set)` pairs.
//!
//! Deleting a user cascades to their sets; deleting a set drops its verse links
//! and favorites. Verses are never deleted.

pub mod memory;
pub mod types;
