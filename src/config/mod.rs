//! Configuration module for ZenSplit
//!
//! - Base directory resolution
//! - User settings persistence (currency symbol, zero tolerance, identity)

pub mod paths;
pub mod settings;

pub use paths::ZenSplitPaths;
pub use settings::Settings;
