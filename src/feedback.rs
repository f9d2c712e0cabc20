// Purpose: Hold the process-lifetime set of labeled preference examples

use serde::{Deserialize, Serialize};

/// The five numeric features shared by dataset records, feedback
/// submissions, and prediction inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    pub sentiment: f64,
    pub valence: f64,
    pub arousal: f64,
    pub dominance: f64,
    pub tempo: f64,
}

impl FeatureVector {
    pub fn to_vector(&self) -> [f64; 5] {
        [
            self.sentiment,
            self.valence,
            self.arousal,
            self.dominance,
            self.tempo,
        ]
    }
}

/// One feature-vector/label pair consumed by the trainer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: FeatureVector,
    /// 1.0 for a preferred record, 0.0 for a not-preferred one.
    pub liked: f64,
}

/// Append-only in-memory training set. Entries are never deduplicated or
/// removed; a restart discards everything.
#[derive(Debug, Default)]
pub struct FeedbackStore {
    examples: Vec<TrainingExample>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one preference choice as two labeled examples.
    pub fn push_pair(&mut self, preferred: FeatureVector, not_preferred: FeatureVector) {
        self.examples.push(TrainingExample {
            input: preferred,
            liked: 1.0,
        });
        self.examples.push(TrainingExample {
            input: not_preferred,
            liked: 0.0,
        });
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
