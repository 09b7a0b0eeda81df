use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown severity label: '{0}'")]
    UnknownSeverity(String),
}
