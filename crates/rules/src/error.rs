//! Error types for rule compilation and lookup.

use std::fmt;
use std::path::PathBuf;

/// Configuration section of a service, named as it appears in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Classification,
    Exclude,
    Enrichments,
    Routes,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Classification => write!(f, "classification"),
            Section::Exclude => write!(f, "exclude"),
            Section::Enrichments => write!(f, "enrichments"),
            Section::Routes => write!(f, "routes"),
        }
    }
}

/// Errors that can occur while building or querying rule sets.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A service definition is structurally invalid.
    #[error("configuration error in service '{service}', section '{section}': {reason}")]
    Configuration {
        service: String,
        section: Section,
        reason: String,
    },

    /// The configuration tree failed to parse.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lookup for a service that was never compiled.
    #[error("service not defined: '{0}'")]
    ServiceNotDefined(String),
}

impl RuleError {
    pub(crate) fn missing(service: &str, section: Section) -> Self {
        RuleError::Configuration {
            service: service.to_string(),
            section,
            reason: "required section is missing".to_string(),
        }
    }

    pub(crate) fn malformed(service: &str, section: Section, reason: impl Into<String>) -> Self {
        RuleError::Configuration {
            service: service.to_string(),
            section,
            reason: reason.into(),
        }
    }

    /// True for every error that means the configuration must be fixed
    /// (invalid service, unparsable tree, unreadable file).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, RuleError::ServiceNotDefined(_))
    }
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_names_service_and_section() {
        let err = RuleError::missing("billing", Section::Routes);
        assert_eq!(
            err.to_string(),
            "configuration error in service 'billing', section 'routes': required section is missing"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn service_not_defined_is_not_a_configuration_error() {
        let err = RuleError::ServiceNotDefined("ghost".to_string());
        assert_eq!(err.to_string(), "service not defined: 'ghost'");
        assert!(!err.is_configuration());
    }

    #[test]
    fn io_error_names_path() {
        let err = RuleError::Io {
            path: PathBuf::from("config/klaxer.yml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().starts_with("failed to read config/klaxer.yml"));
        assert!(err.is_configuration());
    }
}
