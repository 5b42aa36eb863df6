// Built-in scorers
// Registered under the module/class names used in scorer config files.

pub mod document;
pub mod query;
pub mod query_document;
pub mod text;

pub use document::{PopularityScorer, TotalDocumentWordsScorer};
pub use query::ProperNounRatioScorer;
pub use query_document::{QueryDefinitionScorer, Strategy, WhatIsScorer};
pub use text::Tokenizer;

use crate::plugin::error::Result;
use crate::plugin::registry::Registry;

/// Add every built-in scorer class to `registry`
pub fn register_builtins(registry: &mut Registry) -> Result<()> {
    registry.register_document(
        "document_rating_scorer",
        PopularityScorer::CLASS,
        PopularityScorer::from_args,
    )?;
    registry.register_document(
        "document_size_scorer",
        TotalDocumentWordsScorer::CLASS,
        TotalDocumentWordsScorer::from_args,
    )?;
    registry.register_query(
        "query_type_scorer",
        ProperNounRatioScorer::CLASS,
        ProperNounRatioScorer::from_args,
    )?;
    registry.register_query_document(
        "query_definition_scorer",
        WhatIsScorer::CLASS,
        WhatIsScorer::from_args,
    )?;
    registry.register_query_document(
        "query_definition_scorer",
        QueryDefinitionScorer::CLASS,
        QueryDefinitionScorer::from_args,
    )?;
    Ok(())
}
