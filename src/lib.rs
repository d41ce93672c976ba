//! Wardrobe assistant - classifies clothing photos and asks a hosted Gemini
//! model for outfit recommendations and style ratings.
//!
//! Items live in an in-memory wardrobe; the only persisted state is the
//! theme preference.

pub mod ai;
pub mod assistant;
pub mod config;
pub mod error;
pub mod media;
pub mod prompts;
pub mod rating;
pub mod session;
pub mod theme;
pub mod wardrobe;

pub use error::{Error, Result};
