//! Behavioural properties of compilation and evaluation, exercised through
//! the public API with inline YAML fixtures.

use klaxer_core::Severity;
use klaxer_rules::schema::RulesConfig;
use klaxer_rules::{compile, RuleError, RuleEvaluator, RuleLoader, RuleStore, Section};

fn store(yaml: &str) -> RuleStore {
    let config: RulesConfig = RuleLoader::parse_str(yaml).unwrap();
    compile(&config).unwrap()
}

fn compile_err(yaml: &str) -> RuleError {
    let config = RuleLoader::parse_str(yaml).unwrap();
    compile(&config).unwrap_err()
}

const CLASSIFIED: &str = r#"
svc:
  classification:
    CRITICAL: ["db down", "Outage"]
    WARNING: ["latency"]
    OK: ["recovered"]
  routes: ops
"#;

// ── Classification ──────────────────────────────────────────────────

#[test]
fn critical_wins_over_lower_buckets() {
    let store = store(CLASSIFIED);
    for message in [
        "db down",
        "latency then db down",
        "recovered? no, OUTAGE with latency",
    ] {
        assert_eq!(
            RuleEvaluator::classify(&store, "svc", message).unwrap(),
            Severity::Critical,
            "message: {message}"
        );
    }
}

#[test]
fn warning_wins_over_ok() {
    let store = store(CLASSIFIED);
    assert_eq!(
        RuleEvaluator::classify(&store, "svc", "latency recovered").unwrap(),
        Severity::Warning
    );
}

#[test]
fn no_keyword_yields_unknown() {
    let store = store(CLASSIFIED);
    assert_eq!(
        RuleEvaluator::classify(&store, "svc", "cpu at 40%").unwrap(),
        Severity::Unknown
    );
}

#[test]
fn matching_ignores_letter_case() {
    let store = store(CLASSIFIED);
    assert_eq!(
        RuleEvaluator::classify(&store, "svc", "LaTeNcY").unwrap(),
        Severity::Warning
    );
    assert_eq!(
        RuleEvaluator::classify(&store, "svc", "outage").unwrap(),
        Severity::Critical
    );
}

#[test]
fn scenario_db_down_and_slow_is_critical() {
    let store = store(
        "svc:\n  classification:\n    critical: [\"db down\"]\n    warning: [\"latency\"]\n  routes: ops\n",
    );
    assert_eq!(
        RuleEvaluator::classify(&store, "svc", "DB DOWN and slow").unwrap(),
        Severity::Critical
    );
}

// ── Exclusion ───────────────────────────────────────────────────────

#[test]
fn scenario_heartbeat_is_excluded() {
    let store = store("svc:\n  classification: {}\n  exclude: [\"heartbeat\"]\n  routes: ops\n");
    let first = RuleEvaluator::is_excluded(&store, "svc", "heartbeat ok").unwrap();
    let second = RuleEvaluator::is_excluded(&store, "svc", "heartbeat ok").unwrap();
    assert!(first);
    assert_eq!(first, second);
}

#[test]
fn absent_exclude_never_excludes() {
    let store = store(CLASSIFIED);
    assert!(!RuleEvaluator::is_excluded(&store, "svc", "heartbeat").unwrap());
    assert!(store.exclusion_rules("svc").unwrap().is_empty());
}

// ── Enrichment ──────────────────────────────────────────────────────

#[test]
fn scenario_single_template() {
    let store = store("svc:\n  classification: {}\n  enrichments: \"Alert: {0}\"\n  routes: ops\n");
    let enrichments = RuleEvaluator::enrich(&store, "svc", "disk full").unwrap();
    assert_eq!(enrichments.len(), 1);
    assert_eq!(enrichments[0].message, "Alert: disk full");
}

#[test]
fn k_of_n_enrichments_in_order() {
    let store = store(
        r#"
svc:
  classification: {}
  enrichments:
    - IF: "alpha"
      THEN: "A({})"
    - IF: "beta"
      THEN: "B({})"
    - IF: "gamma"
      THEN: "C({})"
    - IF: "delta"
      THEN: "D({})"
  routes: ops
"#,
    );
    let enrichments = RuleEvaluator::enrich(&store, "svc", "delta Alpha").unwrap();
    let messages: Vec<&str> = enrichments.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["A(delta Alpha)", "D(delta Alpha)"]);
}

// ── Routing ─────────────────────────────────────────────────────────

#[test]
fn scenario_all_matching_routes_in_order() {
    let store = store(
        r#"
svc:
  classification: {}
  routes:
    - IF: "db"
      THEN: "dba-team"
    - IF: "disk"
      THEN: "infra-team"
"#,
    );
    assert_eq!(
        RuleEvaluator::route(&store, "svc", "db and disk issue").unwrap(),
        vec!["dba-team", "infra-team"]
    );
    assert_eq!(
        RuleEvaluator::route(&store, "svc", "disk only").unwrap(),
        vec!["infra-team"]
    );
}

#[test]
fn numeric_keywords_match_like_classification_keywords() {
    let store = store(
        r#"
svc:
  classification:
    CRITICAL: [500]
  enrichments:
    - IF: 503
      THEN: "unavailable: {}"
  routes:
    - IF: 500
      THEN: web-team
"#,
    );
    let message = "HTTP 500 then 503";
    assert_eq!(
        RuleEvaluator::classify(&store, "svc", message).unwrap(),
        Severity::Critical
    );
    assert_eq!(RuleEvaluator::route(&store, "svc", message).unwrap(), vec!["web-team"]);
    assert_eq!(
        RuleEvaluator::enrich(&store, "svc", message).unwrap()[0].message,
        "unavailable: HTTP 500 then 503"
    );
}

// ── Store lifecycle ─────────────────────────────────────────────────

#[test]
fn scenario_unknown_service() {
    let store = store(CLASSIFIED);
    let err = RuleEvaluator::evaluate(&store, "ghost", "anything").unwrap_err();
    assert!(matches!(err, RuleError::ServiceNotDefined(ref name) if name == "ghost"));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn recompiling_a_service_replaces_it() {
    let mut store = store(CLASSIFIED);
    let replacement = RuleLoader::parse_str(
        "SVC:\n  classification:\n    OK: [\"fine\"]\n  routes: new-team\n",
    )
    .unwrap();
    let (name, config) = replacement.iter().next().unwrap();
    store.insert_compiled(name, config).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(RuleEvaluator::route(&store, "svc", "x").unwrap(), vec!["new-team"]);
    assert_eq!(
        RuleEvaluator::classify(&store, "svc", "db down").unwrap(),
        Severity::Unknown
    );
}

#[test]
fn missing_required_sections_fail() {
    let err = compile_err("svc:\n  classification: {}\n");
    assert!(matches!(
        err,
        RuleError::Configuration { section: Section::Routes, ref service, .. } if service == "svc"
    ));

    let err = compile_err("svc:\n  routes: ops\n");
    assert!(matches!(
        err,
        RuleError::Configuration { section: Section::Classification, .. }
    ));
}

#[test]
fn malformed_sections_fail() {
    let err = compile_err("svc:\n  classification: {}\n  routes: 42\n");
    assert!(err.to_string().contains("section 'routes'"));

    let err = compile_err("svc:\n  classification: {}\n  enrichments: {IF: db}\n  routes: ops\n");
    assert!(err.to_string().contains("section 'enrichments'"));
}
