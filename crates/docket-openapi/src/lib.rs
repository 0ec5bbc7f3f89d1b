//! Applies resolved dockets to utoipa OpenAPI documents.
//!
//! Kept apart from `docket-core` so resolution stays independent of the
//! documentation library. Reused by:
//! - the `export_dockets` binary (one JSON document per group)
//! - applications building grouped documents at startup

pub mod builder;
pub mod demo;
pub mod schema;
pub mod ui;

pub use builder::DocketBuilder;
pub use demo::ApiDoc;
pub use ui::{SwaggerUiConfig, UiUrl};
