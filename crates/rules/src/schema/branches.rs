//! String-or-conditional-list sections (`enrichments`, `routes`).

use serde::{de, Deserialize, Deserializer, Serialize};

/// Value of an `enrichments` or `routes` section.
///
/// `Single` applies unconditionally. `Conditional` holds `IF`/`THEN` pairs in
/// configured order. Any other YAML shape lands in `Invalid` and is rejected
/// by the compiler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Branches {
    Single(String),
    Conditional(Vec<Conditional>),
    Invalid(serde_yaml::Value),
}

/// One `{IF: keyword, THEN: value}` entry.
///
/// `IF` accepts any YAML scalar, like classification keywords do, so
/// `IF: 500` matches messages containing "500".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Conditional {
    #[serde(rename = "IF", alias = "if", deserialize_with = "scalar_string")]
    pub keyword: String,
    #[serde(rename = "THEN", alias = "then")]
    pub then: String,
}

impl Conditional {
    pub fn new(keyword: impl Into<String>, then: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            then: then.into(),
        }
    }
}

/// Accept a string, number or boolean as its plain-text form.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    use serde_yaml::Value;
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a scalar keyword, found {}",
            describe_shape(&other)
        ))),
    }
}

/// Short description of a YAML value's shape for error messages.
pub fn describe_shape(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list with entries that are not IF/THEN pairs",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
