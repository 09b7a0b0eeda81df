//! Applies a service's compiled rule sets to an alert.
//!
//! Every call is stateless: the result depends only on the store contents and
//! the alert. Enrichment and routing evaluate every rule independently and
//! return all matches in configured order; combining them is up to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use klaxer_core::{Alert, Severity};

use crate::error::Result;
use crate::rule::{
    ClassificationRule, Enrichment, EnrichmentRule, ExclusionRule, RoutingRule, RuleSet, Subject,
};
use crate::store::{RuleStore, ServiceName, ServiceRules};

/// Outcome of running all four rule sets of a service against one alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Normalized service name.
    pub service: String,
    pub severity: Severity,
    pub excluded: bool,
    /// Every enrichment that applied, in configured order.
    pub enrichments: Vec<Enrichment>,
    /// Every destination that applied, in configured order.
    pub routes: Vec<String>,
}

impl Evaluation {
    /// Last-applies-wins fold over the enrichments.
    pub fn last_enrichment(&self) -> Option<&Enrichment> {
        self.enrichments.last()
    }

    /// First matching destination.
    pub fn primary_route(&self) -> Option<&str> {
        self.routes.first().map(String::as_str)
    }
}

/// Evaluates alerts against a [`RuleStore`].
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Run classification, exclusion, enrichment and routing for `service`.
    pub fn evaluate<A: Alert + ?Sized>(
        store: &RuleStore,
        service: &str,
        alert: &A,
    ) -> Result<Evaluation> {
        let rules = store.get(service)?;
        Ok(Self::evaluate_rules(&ServiceName::new(service), rules, alert))
    }

    /// Evaluate already looked-up rule sets.
    pub fn evaluate_rules<A: Alert + ?Sized>(
        service: &ServiceName,
        rules: &ServiceRules,
        alert: &A,
    ) -> Evaluation {
        let subject = Subject::new(alert);
        let evaluation = Evaluation {
            service: service.to_string(),
            severity: classify(&rules.classification, &subject),
            excluded: is_excluded(&rules.exclusion, &subject),
            enrichments: enrich(&rules.enrichment, &subject),
            routes: route(&rules.routing, &subject),
        };
        debug!(
            service = %service,
            severity = %evaluation.severity,
            excluded = evaluation.excluded,
            enrichments = evaluation.enrichments.len(),
            routes = evaluation.routes.len(),
            "evaluated alert"
        );
        evaluation
    }

    pub fn classify<A: Alert + ?Sized>(
        store: &RuleStore,
        service: &str,
        alert: &A,
    ) -> Result<Severity> {
        let rules = store.classification_rules(service)?;
        Ok(classify(rules, &Subject::new(alert)))
    }

    pub fn is_excluded<A: Alert + ?Sized>(
        store: &RuleStore,
        service: &str,
        alert: &A,
    ) -> Result<bool> {
        let rules = store.exclusion_rules(service)?;
        Ok(is_excluded(rules, &Subject::new(alert)))
    }

    pub fn enrich<A: Alert + ?Sized>(
        store: &RuleStore,
        service: &str,
        alert: &A,
    ) -> Result<Vec<Enrichment>> {
        let rules = store.enrichment_rules(service)?;
        Ok(enrich(rules, &Subject::new(alert)))
    }

    pub fn route<A: Alert + ?Sized>(
        store: &RuleStore,
        service: &str,
        alert: &A,
    ) -> Result<Vec<String>> {
        let rules = store.routing_rules(service)?;
        Ok(route(rules, &Subject::new(alert)))
    }
}

// ── Per-kind application ────────────────────────────────────────────

/// Empty set yields `UNKNOWN`; compiled services always carry one rule.
fn classify(rules: &RuleSet<ClassificationRule>, subject: &Subject<'_>) -> Severity {
    rules
        .iter()
        .map(|rule| rule.apply(subject))
        .max()
        .unwrap_or_default()
}

fn is_excluded(rules: &RuleSet<ExclusionRule>, subject: &Subject<'_>) -> bool {
    rules.iter().any(|rule| rule.apply(subject))
}

fn enrich(rules: &RuleSet<EnrichmentRule>, subject: &Subject<'_>) -> Vec<Enrichment> {
    rules.iter().filter_map(|rule| rule.apply(subject)).collect()
}

fn route(rules: &RuleSet<RoutingRule>, subject: &Subject<'_>) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| rule.apply(subject))
        .map(str::to_string)
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────
