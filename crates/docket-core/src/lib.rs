//! Framework-agnostic docket resolution.
//!
//! Turns a bound [`docket_config::SwaggerProperties`] tree into one
//! [`DocketDefinition`] per documentation group. Nothing here talks to the
//! documentation library; `docket-openapi` applies the definitions.

pub mod docket;
pub mod error;
pub mod parameters;
pub mod paths;
pub mod resolve;
pub mod responses;
pub mod security;

pub use docket::*;
pub use error::DocketError;
pub use parameters::{merge, ModelRef, OperationParameter, ParameterPlacement};
pub use paths::{AntPattern, PathSelector, MATCH_ALL};
pub use resolve::{prettify, resolve, DocketResolver, DEFAULT_GROUP};
pub use responses::{RequestMethod, ResponseMessage, ResponseMessageTable};
pub use security::{
    select_scheme, AuthorizationScope, SecurityContext, SecurityReference, SecuritySchemeSpec,
};
