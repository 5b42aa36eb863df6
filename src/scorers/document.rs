// Document scorers: popularity and size signals from a single document

use crate::plugin::error::{ConfigError, PluginError};
use crate::plugin::registry::parse_args;
use crate::plugin::types::{DocumentScorer, InitArgs, Record, ScorerDescriptor, NO_SCORE};
use crate::scorers::text::Tokenizer;
use serde::Deserialize;

fn default_name() -> String {
    "DocumentScorer".to_string()
}

fn default_short_name() -> String {
    "ds".to_string()
}

fn default_description() -> String {
    "Description of the scorer".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentArgs {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default = "default_short_name")]
    short_name: String,
    #[serde(default = "default_description")]
    description: String,
    #[serde(default)]
    include_stop: bool,
}

impl DocumentArgs {
    fn descriptor(&self) -> Result<ScorerDescriptor, ConfigError> {
        ScorerDescriptor::new(&self.name, &self.short_name, &self.description)
    }
}

/// Popularity of a post from its view count and accepted-answer count
pub struct PopularityScorer {
    descriptor: ScorerDescriptor,
}

impl PopularityScorer {
    pub const CLASS: &'static str = "PopularityScorer";

    pub fn new(descriptor: ScorerDescriptor) -> Self {
        Self { descriptor }
    }

    /// Build from config init args. `include_stop` is accepted and ignored.
    pub fn from_args(args: &InitArgs) -> Result<Self, ConfigError> {
        let args: DocumentArgs = parse_args(Self::CLASS, args)?;
        Ok(Self::new(args.descriptor()?))
    }

    /// Tiered rating. `None` when no tier applies.
    pub fn rate(views: f64, accepted: f64) -> Option<f64> {
        if views < 0.0 {
            Some(0.0)
        } else if views > 100.0 && views <= 2000.0 && accepted < 0.0 {
            Some(0.25)
        } else if views > 0.0 && views <= 2000.0 && accepted > 0.0 {
            Some(0.5)
        } else if views > 2000.0 && views <= 5000.0 && accepted > 0.0 {
            Some(0.75)
        } else if views > 5000.0 && accepted > 0.0 {
            Some(1.0)
        } else {
            None
        }
    }
}

impl DocumentScorer for PopularityScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn required_fields(&self) -> Vec<String> {
        vec!["views".to_string(), "accepted".to_string()]
    }

    fn score(&self, document: &Record) -> Result<f64, PluginError> {
        let views = document.require_f64("views")?;
        let accepted = document.require_f64("accepted")?;

        // Unknown view count means no signal
        let Some(views) = views else {
            return Ok(NO_SCORE);
        };
        // Null accepted ranks below every count: it passes `< 0` and fails `> 0`
        let accepted = accepted.unwrap_or(f64::NEG_INFINITY);

        Ok(Self::rate(views, accepted).unwrap_or(NO_SCORE))
    }
}

/// Number of words in the document text, optionally excluding stop words
pub struct TotalDocumentWordsScorer {
    descriptor: ScorerDescriptor,
    include_stop: bool,
    tokenizer: Tokenizer,
}

impl TotalDocumentWordsScorer {
    pub const CLASS: &'static str = "TotalDocumentWordsScorer";
    const FIELD: &'static str = "text";

    pub fn new(descriptor: ScorerDescriptor, include_stop: bool) -> Result<Self, ConfigError> {
        let tokenizer = Tokenizer::new().map_err(|e| ConfigError::InitFailed {
            class: Self::CLASS.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            descriptor,
            include_stop,
            tokenizer,
        })
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConfigError> {
        let args: DocumentArgs = parse_args(Self::CLASS, args)?;
        Self::new(args.descriptor()?, args.include_stop)
    }
}

impl DocumentScorer for TotalDocumentWordsScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn required_fields(&self) -> Vec<String> {
        vec![Self::FIELD.to_string()]
    }

    fn score(&self, document: &Record) -> Result<f64, PluginError> {
        let text = document.require_str(Self::FIELD)?;
        let count = self
            .tokenizer
            .words(text)
            .into_iter()
            .filter(|word| self.include_stop || !self.tokenizer.is_stop(word))
            .count();
        Ok(count as f64)
    }
}
