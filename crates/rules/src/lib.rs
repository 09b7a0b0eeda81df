//! Per-service alert rule engine.
//!
//! This crate provides:
//! - YAML configuration schema with serde deserialization
//! - A compiler turning each service's configuration into four rule sets
//!   (classification, exclusion, enrichment, routing)
//! - An immutable rule store keyed by normalized service name, plus a shared
//!   handle for atomic rebuilds
//! - An evaluator applying the rule sets to an alert
//! - A file loader for the rules configuration

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod rule;
pub mod schema;
pub mod store;

pub use compiler::{compile, compile_service};
pub use error::{Result, RuleError, Section};
pub use evaluator::{Evaluation, RuleEvaluator};
pub use loader::RuleLoader;
pub use store::{RuleStore, ServiceName, ServiceRules, SharedRuleStore};
