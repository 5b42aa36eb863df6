// Scorer plugin error types

use crate::plugin::types::{ScorerDescriptor, ScorerKind};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building a scoring pipeline. Fatal to the load.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Scorer config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Scorer config {} is not a json or yaml file", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Malformed scorer config: {0}")]
    Malformed(String),

    #[error("Scorer class not found: {module}.{class}")]
    UnresolvedClass { module: String, class: String },

    #[error("Scorer class already registered: {module}.{class}")]
    AlreadyRegistered { module: String, class: String },

    #[error("Scorer {class} failed to initialize: {reason}")]
    InitFailed { class: String, reason: String },

    #[error("Scorer {field} = {value:?} is not valid text")]
    InvalidDescriptor { field: &'static str, value: String },

    #[error("Scorer {name} declared as {declared} is a {actual} scorer")]
    KindMismatch {
        name: String,
        declared: ScorerKind,
        actual: ScorerKind,
    },

    #[error("Scorers with name={first} and name={second} have the same short_name={short_name}")]
    DuplicateShortName {
        short_name: String,
        first: String,
        second: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fault raised by a plugin's own scoring computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PluginError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field {field} is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("{0}")]
    Failed(String),
}

/// Request-scoped scoring failure, tagged with the offending scorer.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Scorer {} ({}) failed: {source}", .scorer.short_name(), .scorer.name())]
    Runtime {
        scorer: ScorerDescriptor,
        #[source]
        source: PluginError,
    },

    #[error("Scorer {} ({}) timed out after {timeout:?}", .scorer.short_name(), .scorer.name())]
    Timeout {
        scorer: ScorerDescriptor,
        timeout: Duration,
    },
}

impl ScoreError {
    /// Descriptor of the scorer that failed
    pub fn scorer(&self) -> &ScorerDescriptor {
        match self {
            Self::Runtime { scorer, .. } | Self::Timeout { scorer, .. } => scorer,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
