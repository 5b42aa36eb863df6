// Scorer capability contracts and the values they exchange

use crate::plugin::error::{ConfigError, PluginError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Sentinel for "this scorer has no score for the input". Serialized as null.
pub const NO_SCORE: f64 = f64::NAN;

/// Named constructor arguments for a scorer, taken verbatim from config
pub type InitArgs = Map<String, Value>;

/// Input shape a scorer consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    Document,
    Query,
    QueryDocument,
}

impl ScorerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Query => "query",
            Self::QueryDocument => "query_document",
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a scorer. `short_name` is the feature vector column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorerDescriptor {
    name: String,
    short_name: String,
    description: String,
}

impl ScorerDescriptor {
    /// Build a descriptor, rejecting empty or whitespace-only text
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = require_text("name", name.into())?;
        let short_name = require_text("short_name", short_name.into())?;
        let description = require_text("description", description.into())?;

        Ok(Self {
            name,
            short_name,
            description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn require_text(field: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidDescriptor { field, value });
    }
    Ok(value)
}

/// A single query or document: field name to JSON value.
/// The pipeline never looks inside; scorers pick the fields they need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

pub type QueryRecord = Record;
pub type DocumentRecord = Record;

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field value, or `MissingField` if absent
    pub fn require(&self, field: &str) -> Result<&Value, PluginError> {
        self.0
            .get(field)
            .ok_or_else(|| PluginError::MissingField(field.to_string()))
    }

    /// Field as text. A single-element list is unwrapped, as search engines
    /// return multi-valued fields that way.
    pub fn require_str(&self, field: &str) -> Result<&str, PluginError> {
        let value = match self.require(field)? {
            Value::Array(items) if items.len() == 1 => &items[0],
            other => other,
        };
        value.as_str().ok_or_else(|| PluginError::InvalidField {
            field: field.to_string(),
            reason: format!("expected text, found {}", value),
        })
    }

    /// Field as a number; `Ok(None)` when the field is present but null
    pub fn require_f64(&self, field: &str) -> Result<Option<f64>, PluginError> {
        match self.require(field)? {
            Value::Null => Ok(None),
            value => value.as_f64().map(Some).ok_or_else(|| PluginError::InvalidField {
                field: field.to_string(),
                reason: format!("expected a number, found {}", value),
            }),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Scorer that extracts a signal from a single document
pub trait DocumentScorer: Send + Sync {
    fn descriptor(&self) -> &ScorerDescriptor;

    /// Document fields this scorer reads
    fn required_fields(&self) -> Vec<String> {
        Vec::new()
    }

    fn score(&self, document: &Record) -> Result<f64, PluginError>;
}

/// Scorer that extracts a signal from the query alone
pub trait QueryScorer: Send + Sync {
    fn descriptor(&self) -> &ScorerDescriptor;

    /// Query or document fields this scorer reads
    fn required_fields(&self) -> Vec<String> {
        Vec::new()
    }

    fn score(&self, query: &Record) -> Result<f64, PluginError>;
}

/// Scorer that looks at a query and a document together
pub trait QueryDocumentScorer: Send + Sync {
    fn descriptor(&self) -> &ScorerDescriptor;

    /// Query or document fields this scorer reads
    fn required_fields(&self) -> Vec<String> {
        Vec::new()
    }

    fn score(&self, query: &Record, document: &Record) -> Result<f64, PluginError>;
}

/// A constructed plugin. Exactly one capability per instance.
#[derive(Clone)]
pub enum Scorer {
    Document(Arc<dyn DocumentScorer>),
    Query(Arc<dyn QueryScorer>),
    QueryDocument(Arc<dyn QueryDocumentScorer>),
}

impl Scorer {
    pub fn kind(&self) -> ScorerKind {
        match self {
            Self::Document(_) => ScorerKind::Document,
            Self::Query(_) => ScorerKind::Query,
            Self::QueryDocument(_) => ScorerKind::QueryDocument,
        }
    }

    pub fn descriptor(&self) -> &ScorerDescriptor {
        match self {
            Self::Document(s) => s.descriptor(),
            Self::Query(s) => s.descriptor(),
            Self::QueryDocument(s) => s.descriptor(),
        }
    }

    pub fn required_fields(&self) -> BTreeSet<String> {
        let fields = match self {
            Self::Document(s) => s.required_fields(),
            Self::Query(s) => s.required_fields(),
            Self::QueryDocument(s) => s.required_fields(),
        };
        fields.into_iter().collect()
    }

    /// Run the scorer, handing it only the inputs its kind takes
    pub fn invoke(&self, query: &Record, document: &Record) -> Result<f64, PluginError> {
        match self {
            Self::Document(s) => s.score(document),
            Self::Query(s) => s.score(query),
            Self::QueryDocument(s) => s.score(query, document),
        }
    }
}

impl fmt::Debug for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorer")
            .field("kind", &self.kind())
            .field("short_name", &self.descriptor().short_name())
            .finish()
    }
}
