//! Verse Text Provider Module
//!
//! Wraps the external scripture-text API (ESV passage text endpoint).
//!
//! ## Workflow
//! 1. **Request**: Sends the reference plus fixed formatting options and the API token.
//! 2. **Normalize**: Takes the first returned passage, trimmed.
//! 3. **Report**: Returns `PassageText::NotFound` when the provider has no passage
//!    for the reference. Only transport and decoding failures are errors.

pub mod client;
pub mod handlers;
pub mod types;
