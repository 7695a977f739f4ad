//! Configuration management for the kickabout scorekeeper
//!
//! This module handles configuration loading from environment variables or a
//! TOML file, validation, and default values for rating and team splitting.

pub mod app;
pub mod rating;
pub mod split;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::RatingSettings;
pub use split::SplitSettings;
