//! YAML configuration source.
//!
//! Reads the service-keyed rules file (or a YAML string) into a
//! [`RulesConfig`](crate::schema::RulesConfig) ready for compilation.

mod core;


pub use self::core::RuleLoader;
