//! Turns a [`RulesConfig`] tree into a [`RuleStore`].
//!
//! Compilation is fail-fast: the first invalid service aborts the whole tree
//! and no store is returned.

use tracing::{debug, info, warn};

use klaxer_core::Severity;

use crate::error::{Result, RuleError, Section};
use crate::rule::{
    ClassificationRule, EnrichmentRule, ExclusionRule, Keyword, Keywords, RoutingRule, RuleSet,
    Template,
};
use crate::schema::{describe_shape, Branches, RulesConfig, ServiceConfig};
use crate::store::{RuleStore, ServiceName, ServiceRules};

/// Compile every service of the tree into a fresh store.
///
/// Two keys that normalize to the same service name resolve to the later one
/// in document order.
pub fn compile(config: &RulesConfig) -> Result<RuleStore> {
    let mut store = RuleStore::new();
    for (name, service) in config.iter() {
        let rules = compile_service(name, service)?;
        if store.insert(ServiceName::new(name), rules).is_some() {
            warn!(service = %name, "service defined more than once, keeping the last definition");
        }
    }
    info!(services = store.len(), "compiled rule store");
    Ok(store)
}

/// Compile the four rule sets of a single service.
pub fn compile_service(name: &str, config: &ServiceConfig) -> Result<ServiceRules> {
    let rules = ServiceRules {
        classification: compile_classification(name, config)?,
        exclusion: compile_exclusion(name, config),
        enrichment: compile_enrichment(name, config)?,
        routing: compile_routing(name, config)?,
    };
    debug!(service = %name, counts = %rules.counts(), "compiled service rules");
    Ok(rules)
}

fn compile_classification(
    service: &str,
    config: &ServiceConfig,
) -> Result<RuleSet<ClassificationRule>> {
    let classification = config
        .classification
        .as_ref()
        .ok_or_else(|| RuleError::missing(service, Section::Classification))?;

    let bucket = |severity: Severity| {
        let raw = classification.keywords(severity);
        warn_on_empty(service, Section::Classification, raw.iter().map(String::as_str));
        Keywords::new(raw)
    };

    Ok(RuleSet::new(vec![ClassificationRule::KeywordSeverity {
        critical: bucket(Severity::Critical),
        warning: bucket(Severity::Warning),
        ok: bucket(Severity::Ok),
    }]))
}

fn compile_exclusion(service: &str, config: &ServiceConfig) -> RuleSet<ExclusionRule> {
    match &config.exclude {
        None => RuleSet::empty(),
        Some(keywords) => {
            warn_on_empty(service, Section::Exclude, keywords.iter().map(String::as_str));
            RuleSet::new(vec![ExclusionRule::KeywordExclude {
                keywords: Keywords::new(keywords),
            }])
        }
    }
}

fn compile_enrichment(service: &str, config: &ServiceConfig) -> Result<RuleSet<EnrichmentRule>> {
    let section = Section::Enrichments;
    let parse = |source: &str| {
        Template::parse(source).map_err(|e| {
            RuleError::malformed(service, section, format!("template '{}': {}", source, e))
        })
    };

    match &config.enrichments {
        None => Ok(RuleSet::empty()),
        Some(Branches::Single(template)) => Ok(RuleSet::new(vec![
            EnrichmentRule::UnconditionalTemplate {
                template: parse(template.as_str())?,
            },
        ])),
        Some(Branches::Conditional(entries)) => {
            warn_on_empty(service, section, entries.iter().map(|e| e.keyword.as_str()));
            entries
                .iter()
                .map(|entry| -> Result<EnrichmentRule> {
                    Ok(EnrichmentRule::ConditionalTemplate {
                        keyword: Keyword::new(&entry.keyword),
                        template: parse(entry.then.as_str())?,
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(RuleSet::new)
        }
        Some(Branches::Invalid(value)) => Err(shape_error(service, section, value)),
    }
}

fn compile_routing(service: &str, config: &ServiceConfig) -> Result<RuleSet<RoutingRule>> {
    let section = Section::Routes;
    match &config.routes {
        None => Err(RuleError::missing(service, section)),
        Some(Branches::Single(destination)) => Ok(RuleSet::new(vec![
            RoutingRule::UnconditionalDestination {
                destination: destination.clone(),
            },
        ])),
        Some(Branches::Conditional(entries)) => {
            warn_on_empty(service, section, entries.iter().map(|e| e.keyword.as_str()));
            Ok(entries
                .iter()
                .map(|entry| RoutingRule::ConditionalDestination {
                    keyword: Keyword::new(&entry.keyword),
                    destination: entry.then.clone(),
                })
                .collect())
        }
        Some(Branches::Invalid(value)) => Err(shape_error(service, section, value)),
    }
}

fn shape_error(service: &str, section: Section, value: &serde_yaml::Value) -> RuleError {
    RuleError::malformed(
        service,
        section,
        format!(
            "expected a single string or a list of IF/THEN pairs, found {}",
            describe_shape(value)
        ),
    )
}

fn warn_on_empty<'a>(service: &str, section: Section, mut keywords: impl Iterator<Item = &'a str>) {
    if keywords.any(str::is_empty) {
        warn!(service = %service, section = %section, "empty keyword matches every alert");
    }
}
