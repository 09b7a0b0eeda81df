//! Rule kind enum used for inspection and logging.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four independent rule pipelines of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Classification,
    Exclusion,
    Enrichment,
    Routing,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Classification,
        RuleKind::Exclusion,
        RuleKind::Enrichment,
        RuleKind::Routing,
    ];
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Classification => write!(f, "classification"),
            RuleKind::Exclusion => write!(f, "exclusion"),
            RuleKind::Enrichment => write!(f, "enrichment"),
            RuleKind::Routing => write!(f, "routing"),
        }
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "classification" => Ok(RuleKind::Classification),
            "exclusion" => Ok(RuleKind::Exclusion),
            "enrichment" => Ok(RuleKind::Enrichment),
            "routing" => Ok(RuleKind::Routing),
            other => Err(format!("unknown rule kind: '{}'", other)),
        }
    }
}
