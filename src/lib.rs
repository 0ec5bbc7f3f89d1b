//! Library exports.
//!
//! The workspace crates do the work:
//! - `docket-config` binds the `swagger.*` settings tree
//! - `docket-core` resolves dockets and builds their definitions
//! - `docket-openapi` applies definitions to utoipa documents
//!
//! This crate adds the exporter and logging setup shared by the binary and
//! integration tests.

pub mod export;
pub mod telemetry;

pub use docket_config as config;
pub use docket_core as core;
pub use docket_openapi as openapi;

pub use export::{export_dockets, ExportError, UI_CONFIG_FILE};
