//! YAML configuration schema with serde deserialization.
//!
//! Defines the per-service configuration tree handed to the compiler:
//! - `RulesConfig`: ordered map of service name to `ServiceConfig`
//! - `ServiceConfig`: the four rule sections of one service
//! - `Branches`: the string-or-IF/THEN-list shape shared by enrichments and routes
//!
//! Shapes the compiler must reject with a service-specific error are still
//! accepted here (`Branches::Invalid`) so the error can name the section.

mod branches;
mod classification;
mod service;

pub use branches::*;
pub use classification::*;
pub use service::*;
