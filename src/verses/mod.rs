//! Verse Resolution Module
//!
//! Expands user-typed references into stored verses.
//!
//! ## Workflow
//! 1. **Classify**: `"John 3:16"` is a single verse; `"Romans 8:1-3"` and the bare
//!    chapter `"Psalm 23"` are ranges.
//! 2. **Fetch**: One provider call per reference, asking for `[n]` verse markers on ranges.
//! 3. **Split**: Range text is cut on the markers and each piece gets its own reference.
//! 4. **Cache**: Every (reference, text) pair goes through the find-or-create `VerseStore`.
//!
//! ## Submodules
//! - **`reference`**: Pure parsing: classification, splitting, reference expansion.
//! - **`resolver`**: The provider-driven pipeline above.
//! - **`store`**: Find-or-create access to the `verses` table.

pub mod reference;
pub mod resolver;
pub mod store;
