//! Configuration module for Titt.
//!
//! Handles loading application settings from file and environment.

mod settings;

pub use settings::{GeneralSettings, GithubSettings, Settings, YoutubeSettings};
