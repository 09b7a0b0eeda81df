//! Severity keyword buckets.

use serde::{Deserialize, Serialize};

use klaxer_core::Severity;

/// Keywords per severity label. Every bucket is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClassificationConfig {
    #[serde(default, rename = "CRITICAL", alias = "critical")]
    pub critical: Option<Vec<String>>,
    #[serde(default, rename = "WARNING", alias = "warning")]
    pub warning: Option<Vec<String>>,
    #[serde(default, rename = "OK", alias = "ok")]
    pub ok: Option<Vec<String>>,
}

impl ClassificationConfig {
    /// Keywords configured for a severity. `UNKNOWN` never has keywords.
    pub fn keywords(&self, severity: Severity) -> &[String] {
        let bucket = match severity {
            Severity::Critical => &self.critical,
            Severity::Warning => &self.warning,
            Severity::Ok => &self.ok,
            Severity::Unknown => return &[],
        };
        bucket.as_deref().unwrap_or(&[])
    }
}
