// Query scorers: properties of the query text alone

use crate::plugin::error::{ConfigError, PluginError};
use crate::plugin::registry::parse_args;
use crate::plugin::types::{InitArgs, QueryScorer, Record, ScorerDescriptor};
use crate::scorers::text::Tokenizer;
use serde::Deserialize;

/// Query text parameter
pub const QUERY_FIELD: &str = "q";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProperNounRatioArgs {
    #[serde(default = "ProperNounRatioArgs::default_name")]
    name: String,
    #[serde(default = "ProperNounRatioArgs::default_short_name")]
    short_name: String,
    #[serde(default = "ProperNounRatioArgs::default_description")]
    description: String,
}

impl ProperNounRatioArgs {
    fn default_name() -> String {
        "ProperNounRatioScorer".to_string()
    }

    fn default_short_name() -> String {
        "pnrs".to_string()
    }

    fn default_description() -> String {
        "Proper Noun Ratio Scorer".to_string()
    }
}

/// Fraction of query words that are proper nouns. Keyword-style queries
/// tend to score high.
pub struct ProperNounRatioScorer {
    descriptor: ScorerDescriptor,
    tokenizer: Tokenizer,
}

impl ProperNounRatioScorer {
    pub const CLASS: &'static str = "ProperNounRatioScorer";

    pub fn new(descriptor: ScorerDescriptor) -> Result<Self, ConfigError> {
        let tokenizer = Tokenizer::new().map_err(|e| ConfigError::InitFailed {
            class: Self::CLASS.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            descriptor,
            tokenizer,
        })
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConfigError> {
        let args: ProperNounRatioArgs = parse_args(Self::CLASS, args)?;
        Self::new(ScorerDescriptor::new(
            args.name,
            args.short_name,
            args.description,
        )?)
    }
}

impl QueryScorer for ProperNounRatioScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn required_fields(&self) -> Vec<String> {
        vec![QUERY_FIELD.to_string()]
    }

    fn score(&self, query: &Record) -> Result<f64, PluginError> {
        let text = query.require_str(QUERY_FIELD)?;
        let words = self.tokenizer.words(text);
        if words.is_empty() {
            return Err(PluginError::InvalidField {
                field: QUERY_FIELD.to_string(),
                reason: "query text has no words".to_string(),
            });
        }

        let proper = words
            .iter()
            .filter(|word| self.tokenizer.is_proper_noun(word))
            .count();
        Ok(proper as f64 / words.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(text: &str) -> Record {
        serde_json::from_value(json!({ "q": text })).unwrap()
    }

    #[test]
    fn test_ratio() {
        let scorer = ProperNounRatioScorer::from_args(&InitArgs::new()).unwrap();
        assert_eq!(scorer.descriptor().short_name(), "pnrs");
        assert_eq!(scorer.score(&query("IBM Watson pricing")).unwrap(), 2.0 / 3.0);
        assert_eq!(scorer.score(&query("how do i reset a password")).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_query_is_a_fault() {
        let scorer = ProperNounRatioScorer::from_args(&InitArgs::new()).unwrap();
        assert!(matches!(
            scorer.score(&query("?!")),
            Err(PluginError::InvalidField { .. })
        ));
        assert_eq!(
            scorer.score(&Record::new()),
            Err(PluginError::MissingField("q".to_string()))
        );
    }
}
