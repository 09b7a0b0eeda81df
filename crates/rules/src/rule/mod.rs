//! Compiled rule variants.
//!
//! Each rule holds only the data captured at compile time (lower-cased
//! keywords, parsed templates, destinations) and is evaluated by matching on
//! its variant. Rules never mutate state, so a compiled rule set can be shared
//! freely between evaluations.

mod keywords;
mod kind;
mod template;

use serde::{Deserialize, Serialize};

use klaxer_core::{Alert, Severity};

pub use keywords::{Keyword, Keywords, Subject};
pub use kind::RuleKind;
pub use template::{Template, TemplateError};

/// Common behaviour of the four rule families.
pub trait Rule {
    const KIND: RuleKind;
}

// ── Classification ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassificationRule {
    /// Tests `critical`, then `warning`, then `ok`; first hit wins.
    KeywordSeverity {
        critical: Keywords,
        warning: Keywords,
        ok: Keywords,
    },
}

impl ClassificationRule {
    pub fn apply(&self, subject: &Subject<'_>) -> Severity {
        Severity::PRECEDENCE
            .into_iter()
            .find(|&severity| {
                self.keywords(severity)
                    .is_some_and(|keywords| keywords.matches_any(subject))
            })
            .unwrap_or_default()
    }

    /// Keyword bucket for a severity; `UNKNOWN` has none.
    pub fn keywords(&self, severity: Severity) -> Option<&Keywords> {
        match self {
            ClassificationRule::KeywordSeverity { critical, warning, ok } => match severity {
                Severity::Critical => Some(critical),
                Severity::Warning => Some(warning),
                Severity::Ok => Some(ok),
                Severity::Unknown => None,
            },
        }
    }

    pub fn evaluate<A: Alert + ?Sized>(&self, alert: &A) -> Severity {
        self.apply(&Subject::new(alert))
    }
}

impl Rule for ClassificationRule {
    const KIND: RuleKind = RuleKind::Classification;
}

// ── Exclusion ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExclusionRule {
    KeywordExclude { keywords: Keywords },
}

impl ExclusionRule {
    /// True when the alert should be dropped.
    pub fn apply(&self, subject: &Subject<'_>) -> bool {
        match self {
            ExclusionRule::KeywordExclude { keywords } => keywords.matches_any(subject),
        }
    }

    pub fn evaluate<A: Alert + ?Sized>(&self, alert: &A) -> bool {
        self.apply(&Subject::new(alert))
    }
}

impl Rule for ExclusionRule {
    const KIND: RuleKind = RuleKind::Exclusion;
}

// ── Enrichment ──────────────────────────────────────────────────────

/// A rewritten message produced by an enrichment rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnrichmentRule {
    UnconditionalTemplate { template: Template },
    ConditionalTemplate { keyword: Keyword, template: Template },
}

impl EnrichmentRule {
    /// `None` means the rule had no effect on this alert.
    pub fn apply(&self, subject: &Subject<'_>) -> Option<Enrichment> {
        let template = match self {
            EnrichmentRule::UnconditionalTemplate { template } => template,
            EnrichmentRule::ConditionalTemplate { keyword, template } => {
                if !keyword.matches(subject) {
                    return None;
                }
                template
            }
        };
        Some(Enrichment {
            message: template.render(subject.message()),
        })
    }

    pub fn evaluate<A: Alert + ?Sized>(&self, alert: &A) -> Option<Enrichment> {
        self.apply(&Subject::new(alert))
    }
}

impl Rule for EnrichmentRule {
    const KIND: RuleKind = RuleKind::Enrichment;
}

// ── Routing ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutingRule {
    UnconditionalDestination { destination: String },
    ConditionalDestination { keyword: Keyword, destination: String },
}

impl RoutingRule {
    /// `None` means the rule had no effect on this alert.
    pub fn apply(&self, subject: &Subject<'_>) -> Option<&str> {
        match self {
            RoutingRule::UnconditionalDestination { destination } => Some(destination.as_str()),
            RoutingRule::ConditionalDestination {
                keyword,
                destination,
            } => keyword.matches(subject).then_some(destination.as_str()),
        }
    }

    pub fn evaluate<A: Alert + ?Sized>(&self, alert: &A) -> Option<&str> {
        self.apply(&Subject::new(alert))
    }
}

impl Rule for RoutingRule {
    const KIND: RuleKind = RuleKind::Routing;
}

// ── Rule sets ───────────────────────────────────────────────────────

/// Ordered rules of one kind for one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleSet<R> {
    rules: Vec<R>,
}

impl<R> RuleSet<R> {
    pub fn new(rules: Vec<R>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.rules
    }
}

impl<R: Rule> RuleSet<R> {
    pub fn kind(&self) -> RuleKind {
        R::KIND
    }
}

impl<R> Default for RuleSet<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> FromIterator<R> for RuleSet<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, R> IntoIterator for &'a RuleSet<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
