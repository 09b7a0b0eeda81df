//! Case-insensitive substring matching.

use serde::Serialize;

use klaxer_core::Alert;

/// An alert message prepared for matching.
///
/// Lower-cases the message once so every rule applied during one evaluation
/// shares the same haystack.
#[derive(Debug, Clone)]
pub struct Subject<'a> {
    message: &'a str,
    lowered: String,
}

impl<'a> Subject<'a> {
    pub fn new<A: Alert + ?Sized>(alert: &'a A) -> Self {
        let message = alert.message();
        Self {
            message,
            lowered: message.to_lowercase(),
        }
    }

    /// The original, unmodified message.
    pub fn message(&self) -> &'a str {
        self.message
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }
}

/// A single lower-cased needle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(keyword: &str) -> Self {
        Self(keyword.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring containment against the lower-cased message.
    /// An empty keyword matches every message.
    pub fn matches(&self, subject: &Subject<'_>) -> bool {
        subject.lowered.contains(self.0.as_str())
    }
}

/// A set of needles; matches when any one of them is contained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Keywords(Vec<Keyword>);

impl Keywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(keywords.into_iter().map(|k| Keyword::new(k.as_ref())).collect())
    }

    pub fn matches_any(&self, subject: &Subject<'_>) -> bool {
        self.0.iter().any(|k| k.matches(subject))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
