//! CLI library for testing purposes

pub mod check;
pub mod config;
pub mod discover;
pub mod path_glob;
pub mod preview;
pub mod sync;
pub mod validation;

pub use config::{Config, load_config};
pub use discover::discover_targets;
pub use path_glob::expand_target_globs;
