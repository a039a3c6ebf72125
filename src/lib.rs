//! Highlight Gallery library.
//!
//! A web gallery of media highlights stored in a Supabase table: browse,
//! filter by game, tag, and username, and open clips in a focused view.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod components;
pub mod config;
pub mod constants;
pub mod filters;
pub mod model;
pub mod orchestrator;
pub mod store;
pub mod web;
