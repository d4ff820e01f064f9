//! Persistent map memory for a tile-based game: what the player has seen, paged to disk one region at a time.
//!
//! See [`recall_map`] for the data model. This crate adds the per-player [`Config`] file.

mod config;

pub use config::Config;
pub use recall_map::*;
