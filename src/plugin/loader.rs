// Scorer pipeline loader
// Reads the declarative scorer list and turns it into a validated pipeline.

use crate::plugin::error::{ConfigError, Result};
use crate::plugin::registry::Registry;
use crate::plugin::types::{InitArgs, ScorerKind};
use crate::scoring::ScoringPipeline;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One scorer declaration from the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfigEntry {
    #[serde(rename = "type", alias = "kind")]
    pub kind: ScorerKind,
    #[serde(alias = "module_ref")]
    pub module: String,
    #[serde(rename = "class", alias = "class_name")]
    pub class: String,
    pub init_args: InitArgs,
}

/// Top-level layout of a scorer config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScorerConfigFile {
    pub scorers: Vec<ScorerConfigEntry>,
}

/// Accepted scorer config encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Load a scorer config file and build its pipeline
pub fn load(path: impl AsRef<Path>, registry: &Registry) -> Result<ScoringPipeline> {
    let path = path.as_ref();
    let entries = load_entries(path)?;
    let pipeline = build_pipeline(&entries, registry)?;

    info!(
        "Loaded {} scorers from {} ({} document, {} query, {} query_document)",
        pipeline.len(),
        path.display(),
        pipeline.document_scorers().len(),
        pipeline.query_scorers().len(),
        pipeline.query_document_scorers().len()
    );
    Ok(pipeline)
}

/// Read the scorer entries from a file, in declaration order
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<ScorerConfigEntry>> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

    let content = fs::read_to_string(path)?;
    parse_entries(&content, format)
}

/// Parse scorer entries from config text
pub fn parse_entries(content: &str, format: ConfigFormat) -> Result<Vec<ScorerConfigEntry>> {
    let file: ScorerConfigFile = match format {
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))?
        }
        ConfigFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))?
        }
    };
    Ok(file.scorers)
}

/// Construct and validate every entry, preserving declaration order per kind.
/// Nothing is returned unless every entry succeeds.
pub fn build_pipeline(entries: &[ScorerConfigEntry], registry: &Registry) -> Result<ScoringPipeline> {
    let mut pipeline = ScoringPipeline::new();
    // short_name -> name of the scorer that claimed it
    let mut short_names: HashMap<String, String> = HashMap::new();

    for entry in entries {
        let scorer = registry.instantiate(entry)?;
        let descriptor = scorer.descriptor();

        if scorer.kind() != entry.kind {
            return Err(ConfigError::KindMismatch {
                name: descriptor.name().to_string(),
                declared: entry.kind,
                actual: scorer.kind(),
            });
        }

        if let Some(first) = short_names.get(descriptor.short_name()) {
            return Err(ConfigError::DuplicateShortName {
                short_name: descriptor.short_name().to_string(),
                first: first.clone(),
                second: descriptor.name().to_string(),
            });
        }
        short_names.insert(
            descriptor.short_name().to_string(),
            descriptor.name().to_string(),
        );

        info!(
            "Loaded {} scorer {} ({}.{})",
            entry.kind,
            descriptor.short_name(),
            entry.module,
            entry.class
        );
        pipeline.push(scorer);
    }

    Ok(pipeline)
}
