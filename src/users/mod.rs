//! Users Module
//!
//! Registration, profiles and the acting-user extractor. Passwords and sessions
//! belong to the front end, which forwards the logged-in user's id in the
//! `x-user-id` header.

pub mod extract;
pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
