//! Verse Sets Module
//!
//! Named, ordered collections of verses owned by one user.
//!
//! ## Workflow
//! 1. **Validate**: The submitted name must be 1 to 50 characters.
//! 2. **Resolve**: The submitted references go through the `ReferenceResolver`;
//!    a form whose references all fail is rejected.
//! 3. **Store**: The set row and its ordered verse links are written.
//! 4. **Sync**: The written set is handed to the index synchronizer.
//!
//! Edit and delete are owner-only, copy is for everyone but the owner, and any
//! identified user can toggle a set in their favorites.

pub mod handlers;
pub mod service;
pub mod types;
