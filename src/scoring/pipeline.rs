// Loaded scorer pipeline

use crate::plugin::types::{
    DocumentScorer, QueryDocumentScorer, QueryScorer, Scorer, ScorerDescriptor,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Ordered scorers, one sequence per kind, in config order.
///
/// Column order of every feature vector is defined by [`ScoringPipeline::iter`]:
/// document scorers, then query scorers, then query/document scorers.
#[derive(Clone, Default)]
pub struct ScoringPipeline {
    document: Vec<Arc<dyn DocumentScorer>>,
    query: Vec<Arc<dyn QueryScorer>>,
    query_document: Vec<Arc<dyn QueryDocumentScorer>>,
}

impl std::fmt::Debug for ScoringPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl ScoringPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scorer to the sequence for its kind
    pub(crate) fn push(&mut self, scorer: Scorer) {
        match scorer {
            Scorer::Document(s) => self.document.push(s),
            Scorer::Query(s) => self.query.push(s),
            Scorer::QueryDocument(s) => self.query_document.push(s),
        }
    }

    pub fn document_scorers(&self) -> &[Arc<dyn DocumentScorer>] {
        &self.document
    }

    pub fn query_scorers(&self) -> &[Arc<dyn QueryScorer>] {
        &self.query
    }

    pub fn query_document_scorers(&self) -> &[Arc<dyn QueryDocumentScorer>] {
        &self.query_document
    }

    /// Every scorer in column order
    pub fn iter(&self) -> impl Iterator<Item = Scorer> + '_ {
        let document = self.document.iter().cloned().map(Scorer::Document);
        let query = self.query.iter().cloned().map(Scorer::Query);
        let query_document = self
            .query_document
            .iter()
            .cloned()
            .map(Scorer::QueryDocument);
        document.chain(query).chain(query_document)
    }

    /// Descriptors in column order
    pub fn descriptors(&self) -> Vec<ScorerDescriptor> {
        self.iter().map(|s| s.descriptor().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.document.len() + self.query.len() + self.query_document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feature vector column headers
    pub fn headers(&self) -> Vec<String> {
        super::assembler::headers(self)
    }

    /// Fields the query and query/document scorers read, deduplicated
    pub fn required_fields(&self) -> BTreeSet<String> {
        let mut fields = BTreeSet::new();
        for scorer in &self.query {
            fields.extend(scorer.required_fields());
        }
        for scorer in &self.query_document {
            fields.extend(scorer.required_fields());
        }
        fields
    }
}
