//! In-memory, per-service store of compiled rule sets.
//!
//! Keys are [`ServiceName`]s, which lower-case on construction, so insert and
//! lookup normalize the same way. The store is immutable once shared; see
//! [`SharedRuleStore`] for swapping in a rebuilt store at runtime.

mod shared;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::compiler::compile_service;
use crate::error::{Result, RuleError};
use crate::rule::{
    ClassificationRule, EnrichmentRule, ExclusionRule, RoutingRule, RuleKind, RuleSet,
};
use crate::schema::ServiceConfig;

pub use shared::SharedRuleStore;

/// A service name normalized to lower case.
///
/// There is no `Borrow<str>` impl; raw strings go through
/// [`ServiceName::new`] before they key a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four compiled rule sets of one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRules {
    pub classification: RuleSet<ClassificationRule>,
    pub exclusion: RuleSet<ExclusionRule>,
    pub enrichment: RuleSet<EnrichmentRule>,
    pub routing: RuleSet<RoutingRule>,
}

impl ServiceRules {
    pub fn counts(&self) -> RuleCounts {
        RuleCounts {
            classification: self.classification.len(),
            exclusion: self.exclusion.len(),
            enrichment: self.enrichment.len(),
            routing: self.routing.len(),
        }
    }
}

/// Number of rules per kind, for logs and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleCounts {
    pub classification: usize,
    pub exclusion: usize,
    pub enrichment: usize,
    pub routing: usize,
}

impl RuleCounts {
    pub fn get(&self, kind: RuleKind) -> usize {
        match kind {
            RuleKind::Classification => self.classification,
            RuleKind::Exclusion => self.exclusion,
            RuleKind::Enrichment => self.enrichment,
            RuleKind::Routing => self.routing,
        }
    }
}

impl fmt::Display for RuleCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in RuleKind::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", kind, self.get(kind))?;
        }
        Ok(())
    }
}

/// Compiled rules for every configured service.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    services: HashMap<ServiceName, ServiceRules>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up all four rule sets of a service (case-insensitive).
    pub fn get(&self, service: &str) -> Result<&ServiceRules> {
        self.services
            .get(&ServiceName::new(service))
            .ok_or_else(|| RuleError::ServiceNotDefined(service.to_string()))
    }

    pub fn classification_rules(&self, service: &str) -> Result<&RuleSet<ClassificationRule>> {
        self.get(service).map(|rules| &rules.classification)
    }

    pub fn exclusion_rules(&self, service: &str) -> Result<&RuleSet<ExclusionRule>> {
        self.get(service).map(|rules| &rules.exclusion)
    }

    pub fn enrichment_rules(&self, service: &str) -> Result<&RuleSet<EnrichmentRule>> {
        self.get(service).map(|rules| &rules.enrichment)
    }

    pub fn routing_rules(&self, service: &str) -> Result<&RuleSet<RoutingRule>> {
        self.get(service).map(|rules| &rules.routing)
    }

    /// Compile one service and replace its entry wholesale.
    ///
    /// The previous entry (if any) is left untouched when compilation fails.
    pub fn insert_compiled(&mut self, name: &str, config: &ServiceConfig) -> Result<()> {
        let rules = compile_service(name, config)?;
        self.insert(ServiceName::new(name), rules);
        Ok(())
    }

    /// Replace a service entry, returning the previous rule sets.
    pub(crate) fn insert(&mut self, name: ServiceName, rules: ServiceRules) -> Option<ServiceRules> {
        self.services.insert(name, rules)
    }

    pub fn contains(&self, service: &str) -> bool {
        self.services.contains_key(&ServiceName::new(service))
    }

    /// Normalized service names, sorted.
    pub fn services(&self) -> Vec<&ServiceName> {
        let mut names: Vec<&ServiceName> = self.services.keys().collect();
        names.sort();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ServiceName, &ServiceRules)> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Branches, ClassificationConfig};

    fn service(route: &str) -> ServiceConfig {
        ServiceConfig {
            classification: Some(ClassificationConfig::default()),
            routes: Some(Branches::Single(route.to_string())),
            ..ServiceConfig::default()
        }
    }

    fn first_route(store: &RuleStore, name: &str) -> String {
        let routing = store.routing_rules(name).unwrap();
        routing.as_slice()[0].evaluate("x").unwrap().to_string()
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut store = RuleStore::new();
        store.insert_compiled("Billing", &service("ops")).unwrap();
        assert!(store.contains("billing"));
        assert!(store.contains("BILLING"));
        assert_eq!(store.services(), vec![&ServiceName::new("billing")]);
        assert!(store.classification_rules("bIlLiNg").is_ok());
    }

    #[test]
    fn unknown_service_is_an_error() {
        let store = RuleStore::new();
        let err = store.get("ghost").unwrap_err();
        assert!(matches!(err, RuleError::ServiceNotDefined(ref name) if name == "ghost"));
        assert!(store.exclusion_rules("ghost").is_err());
        assert!(store.enrichment_rules("ghost").is_err());
        assert!(store.routing_rules("ghost").is_err());
    }

    #[test]
    fn recompiling_overwrites_without_merge() {
        let mut store = RuleStore::new();
        let mut first = service("first-team");
        first.exclude = Some(vec!["heartbeat".to_string()]);
        store.insert_compiled("billing", &first).unwrap();
        store.insert_compiled("BILLING", &service("second-team")).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(first_route(&store, "billing"), "second-team");
        assert!(store.exclusion_rules("billing").unwrap().is_empty());
    }

    #[test]
    fn failed_recompile_keeps_previous_entry() {
        let mut store = RuleStore::new();
        store.insert_compiled("billing", &service("ops")).unwrap();

        let broken = ServiceConfig {
            routes: None,
            ..service("unused")
        };
        assert!(store.insert_compiled("billing", &broken).is_err());
        assert_eq!(first_route(&store, "billing"), "ops");
    }

    #[test]
    fn failed_first_compile_is_not_admitted() {
        let mut store = RuleStore::new();
        let broken = ServiceConfig {
            classification: None,
            ..service("ops")
        };
        assert!(store.insert_compiled("billing", &broken).is_err());
        assert!(!store.contains("billing"));
        assert!(store.is_empty());
    }

    #[test]
    fn counts_display() {
        let mut store = RuleStore::new();
        store.insert_compiled("billing", &service("ops")).unwrap();
        let counts = store.get("billing").unwrap().counts();
        assert_eq!(
            counts.to_string(),
            "classification=1 exclusion=0 enrichment=0 routing=1"
        );
        assert_eq!(counts.get(RuleKind::Routing), 1);
        assert_eq!(counts.get(RuleKind::Exclusion), 0);
    }
}
