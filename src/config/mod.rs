//! Configuration module for KeyRing
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::KeyringPaths;
pub use settings::Settings;
