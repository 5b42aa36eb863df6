// Feature vector assembly

use crate::plugin::error::ScoreError;
use crate::scoring::ScoringPipeline;
use serde::{Serialize, Serializer};

/// Ordered scores for one (query, document) pair, aligned with the
/// pipeline's headers
#[derive(Debug, Clone, Default)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// True if the scorer at `index` reported no score
    pub fn is_missing(&self, index: usize) -> bool {
        self.values.get(index).is_some_and(|v| v.is_nan())
    }
}

// NaN marks "no score"; treat two missing cells as equal
impl PartialEq for FeatureVector {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cells: Vec<Option<f64>> = self
            .values
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect();
        cells.serialize(serializer)
    }
}

/// Collect per-scorer results, given in pipeline order, into a vector.
/// The first failure in pipeline order fails the whole request.
pub fn assemble<I>(results: I) -> Result<FeatureVector, ScoreError>
where
    I: IntoIterator<Item = Result<f64, ScoreError>>,
{
    let values = results.into_iter().collect::<Result<Vec<f64>, ScoreError>>()?;
    Ok(FeatureVector { values })
}

/// Short names in the order `assemble` places scores
pub fn headers(pipeline: &ScoringPipeline) -> Vec<String> {
    pipeline
        .iter()
        .map(|scorer| scorer.descriptor().short_name().to_string())
        .collect()
}
