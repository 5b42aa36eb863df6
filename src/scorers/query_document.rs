// Query/document scorers for definition questions ("what is X")

use crate::plugin::error::{ConfigError, PluginError};
use crate::plugin::registry::parse_args;
use crate::plugin::types::{InitArgs, QueryDocumentScorer, Record, ScorerDescriptor};
use crate::scorers::query::QUERY_FIELD;
use crate::scorers::text::Tokenizer;
use regex::Regex;
use serde::Deserialize;

const TEXT_FIELD: &str = "text";

/// How per-sentence scores combine into one feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Max,
    Average,
}

impl Strategy {
    /// Combine sentence scores; a document without sentences scores 0
    pub fn aggregate(&self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        match self {
            Self::Max => scores.iter().copied().fold(f64::MIN, f64::max),
            Self::Average => scores.iter().sum::<f64>() / scores.len() as f64,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionArgs {
    name: Option<String>,
    short_name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    strategy: Strategy,
}

impl DefinitionArgs {
    fn descriptor(self, name: &str, short_name: &str, description: &str) -> Result<ScorerDescriptor, ConfigError> {
        ScorerDescriptor::new(
            self.name.unwrap_or_else(|| name.to_string()),
            self.short_name.unwrap_or_else(|| short_name.to_string()),
            self.description.unwrap_or_else(|| description.to_string()),
        )
    }
}

fn init_failed(class: &str, e: regex::Error) -> ConfigError {
    ConfigError::InitFailed {
        class: class.to_string(),
        reason: e.to_string(),
    }
}

/// For "what is X", the share (or max) of document sentences that read
/// "X is ...".
pub struct WhatIsScorer {
    descriptor: ScorerDescriptor,
    strategy: Strategy,
    question: Regex,
    tokenizer: Tokenizer,
}

impl WhatIsScorer {
    pub const CLASS: &'static str = "WhatIsScorer";

    pub fn new(descriptor: ScorerDescriptor, strategy: Strategy) -> Result<Self, ConfigError> {
        Ok(Self {
            descriptor,
            strategy,
            question: Regex::new(r"^what is (.+)$").map_err(|e| init_failed(Self::CLASS, e))?,
            tokenizer: Tokenizer::new().map_err(|e| init_failed(Self::CLASS, e))?,
        })
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConfigError> {
        let args: DefinitionArgs = parse_args(Self::CLASS, args)?;
        let strategy = args.strategy;
        let descriptor = args.descriptor(
            "WhatIsScorer",
            "wis",
            "Sentences that define the subject of a what-is question",
        )?;
        Self::new(descriptor, strategy)
    }
}

impl QueryDocumentScorer for WhatIsScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn required_fields(&self) -> Vec<String> {
        vec![TEXT_FIELD.to_string()]
    }

    fn score(&self, query: &Record, document: &Record) -> Result<f64, PluginError> {
        let question = query.require_str(QUERY_FIELD)?.trim().to_lowercase();
        let Some(subject) = self.question.captures(&question).and_then(|c| c.get(1)) else {
            return Ok(0.0);
        };

        let answer = Regex::new(&format!(
            r"^{} (?:is|are|am|was) ",
            regex::escape(subject.as_str().trim())
        ))
        .map_err(|e| PluginError::Failed(e.to_string()))?;

        let text = document.require_str(TEXT_FIELD)?;
        let scores: Vec<f64> = self
            .tokenizer
            .sentences(text)
            .into_iter()
            .map(|sentence| {
                if answer.is_match(&sentence.to_lowercase()) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();

        Ok(self.strategy.aggregate(&scores))
    }
}

/// For "what is/are/am/was X", scores each "Y is ..." sentence by how close
/// Y is to X.
pub struct QueryDefinitionScorer {
    descriptor: ScorerDescriptor,
    strategy: Strategy,
    question: Regex,
    definition: Regex,
    tokenizer: Tokenizer,
}

impl QueryDefinitionScorer {
    pub const CLASS: &'static str = "QueryDefinitionScorer";

    pub fn new(descriptor: ScorerDescriptor, strategy: Strategy) -> Result<Self, ConfigError> {
        Ok(Self {
            descriptor,
            strategy,
            question: Regex::new(r"^what (?:is|are|am|was) (.+)$")
                .map_err(|e| init_failed(Self::CLASS, e))?,
            definition: Regex::new(r"^(.+?) (?:is|are|am|was) ")
                .map_err(|e| init_failed(Self::CLASS, e))?,
            tokenizer: Tokenizer::new().map_err(|e| init_failed(Self::CLASS, e))?,
        })
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConfigError> {
        let args: DefinitionArgs = parse_args(Self::CLASS, args)?;
        let strategy = args.strategy;
        let descriptor = args.descriptor(
            "QueryDefinitionScorer",
            "qds",
            "Overlap between a definition question and defining sentences",
        )?;
        Self::new(descriptor, strategy)
    }

    /// The thing a definition question asks about, if it is one
    pub fn to_be_defined(&self, query: &Record) -> Option<String> {
        let text = query.get(QUERY_FIELD)?.as_str()?.trim().to_lowercase();
        let captures = self.question.captures(&text)?;
        Some(captures.get(1)?.as_str().trim().to_string())
    }

    fn sentence_overlap(&self, subject: &str, sentence: &str) -> f64 {
        let sentence = sentence.to_lowercase();
        match self.definition.captures(&sentence).and_then(|c| c.get(1)) {
            Some(defined) => self.tokenizer.similarity(defined.as_str(), subject),
            None => 0.0,
        }
    }
}

impl QueryDocumentScorer for QueryDefinitionScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn required_fields(&self) -> Vec<String> {
        vec![TEXT_FIELD.to_string()]
    }

    fn score(&self, query: &Record, document: &Record) -> Result<f64, PluginError> {
        let Some(subject) = self.to_be_defined(query) else {
            return Ok(0.0);
        };

        let text = document.require_str(TEXT_FIELD)?;
        let scores: Vec<f64> = self
            .tokenizer
            .sentences(text)
            .into_iter()
            .map(|sentence| self.sentence_overlap(&subject, sentence))
            .collect();

        Ok(self.strategy.aggregate(&scores))
    }
}
