//! Per-service configuration and the service-keyed tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Branches, ClassificationConfig};

/// Rule configuration for a single service.
///
/// Every section is optional at parse time; the compiler enforces that
/// `classification` and `routes` are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub classification: Option<ClassificationConfig>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub enrichments: Option<Branches>,
    #[serde(default)]
    pub routes: Option<Branches>,
}

/// The full configuration tree, keyed by service name in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RulesConfig {
    pub services: IndexMap<String, ServiceConfig>,
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a service entry (exact key, no normalization).
    pub fn insert(&mut self, name: impl Into<String>, config: ServiceConfig) {
        self.services.insert(name.into(), config);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ServiceConfig)> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl FromIterator<(String, ServiceConfig)> for RulesConfig {
    fn from_iter<I: IntoIterator<Item = (String, ServiceConfig)>>(iter: I) -> Self {
        Self {
            services: iter.into_iter().collect(),
        }
    }
}
