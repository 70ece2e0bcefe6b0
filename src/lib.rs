pub mod config;
pub mod error;

// Core engine
pub mod catalog;
pub mod matching;

// Outer surfaces
pub mod api;
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
