//! Binding for the `swagger.*` settings tree.
//!
//! The model mirrors the shape of the settings files; loaders read it from
//! HOCON (`application.conf`) or from yaml/toml/json via the `config` crate.

mod de;
pub mod loader;
pub mod model;

pub use loader::{ConfigError, Format, Settings, ENV_PREFIX};
pub use model::*;
