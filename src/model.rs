//! Preference model: a small feed-forward network trained on feedback pairs.
//!
//! The numeric implementation lives behind the [`PreferenceModel`] trait so
//! the HTTP layer never touches `ndarray` directly.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::config_loader::TrainingConfig;
use crate::errors::{ReelError, ReelResult};
use crate::feedback::{FeatureVector, TrainingExample};

/// Number of input features (sentiment, valence, arousal, dominance, tempo).
pub const FEATURE_COUNT: usize = 5;

/// Hidden layer width of the default topology.
const HIDDEN_SIZE: usize = 3;

/// Weight/bias snapshot for one network layer, as returned by `/train`.
/// Layer 0 is the input layer and carries no parameters.
#[derive(Debug, Clone, Serialize)]
pub struct LayerSnapshot {
    pub layer: usize,
    pub weights: Option<Vec<Vec<f64>>>,
    pub biases: Option<Vec<f64>>,
}

/// Outcome of one training run.
#[derive(Debug, Clone, Copy)]
pub struct TrainingReport {
    pub iterations: usize,
    pub error: f64,
}

/// Capability interface for the trained preference model.
pub trait PreferenceModel {
    /// Re-train over the full example set. Replaces the model state.
    fn train(
        &mut self,
        examples: &[TrainingExample],
        options: &TrainingConfig,
    ) -> ReelResult<TrainingReport>;

    /// Liked probability for one feature vector.
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Per-layer weight/bias matrices, input layer first.
    fn layers(&self) -> Vec<LayerSnapshot>;

    fn is_trained(&self) -> bool;
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// One dense layer: `weights` is `[outputs, inputs]`.
struct DenseLayer {
    weights: Array2<f64>,
    biases: Array1<f64>,
}

impl DenseLayer {
    fn random(inputs: usize, outputs: usize, rng: &mut StdRng) -> Self {
        Self {
            weights: Array2::from_shape_fn((outputs, inputs), |_| rng.random_range(-0.2..0.2)),
            biases: Array1::from_shape_fn(outputs, |_| rng.random_range(-0.2..0.2)),
        }
    }

    fn forward(&self, input: &Array1<f64>) -> Array1<f64> {
        (self.weights.dot(input) + &self.biases).mapv(sigmoid)
    }
}

/// Sigmoid MLP with the fixed 5 -> 3 -> 1 topology, trained by per-example
/// gradient descent on squared error.
pub struct FeedForwardNet {
    layers: Vec<DenseLayer>,
    trained: bool,
}

impl FeedForwardNet {
    pub fn new() -> Self {
        let mut rng = StdRng::from_os_rng();
        Self {
            layers: Self::fresh_layers(&mut rng),
            trained: false,
        }
    }

    fn fresh_layers(rng: &mut StdRng) -> Vec<DenseLayer> {
        vec![
            DenseLayer::random(FEATURE_COUNT, HIDDEN_SIZE, rng),
            DenseLayer::random(HIDDEN_SIZE, 1, rng),
        ]
    }

    /// Discard any learned weights and start from a fresh initialization.
    /// Every training run resets, so repeated runs with the same seed and
    /// data are deterministic.
    fn reset(&mut self, seed: Option<u64>) {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.layers = Self::fresh_layers(&mut rng);
        self.trained = false;
    }

    /// Forward pass keeping every layer's activation for backprop.
    fn forward_all(&self, input: Array1<f64>) -> Vec<Array1<f64>> {
        let mut activations = vec![input];
        for layer in &self.layers {
            let next = layer.forward(&activations[activations.len() - 1]);
            activations.push(next);
        }
        activations
    }

    /// One gradient step on a single example; returns its squared error.
    fn learn_one(&mut self, example: &TrainingExample, learning_rate: f64) -> f64 {
        let input = Array1::from_iter(example.input.to_vector());
        let activations = self.forward_all(input);

        let output = &activations[self.layers.len()];
        let target = Array1::from_elem(output.len(), example.liked);
        let sample_error = (&target - output).mapv(|e| e * e).mean().unwrap_or(0.0);

        // Output delta for squared error through the sigmoid.
        let mut delta = (output - &target) * output * &output.mapv(|a| 1.0 - a);

        for idx in (0..self.layers.len()).rev() {
            let prev = &activations[idx];
            let grad = delta
                .clone()
                .insert_axis(Axis(1))
                .dot(&prev.clone().insert_axis(Axis(0)));

            let next_delta = if idx > 0 {
                let back = self.layers[idx].weights.t().dot(&delta);
                Some(back * prev * &prev.mapv(|a| 1.0 - a))
            } else {
                None
            };

            let layer = &mut self.layers[idx];
            layer.weights -= &(grad * learning_rate);
            layer.biases -= &(&delta * learning_rate);

            if let Some(next) = next_delta {
                delta = next;
            }
        }

        sample_error
    }
}

impl Default for FeedForwardNet {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceModel for FeedForwardNet {
    fn train(
        &mut self,
        examples: &[TrainingExample],
        options: &TrainingConfig,
    ) -> ReelResult<TrainingReport> {
        if examples.is_empty() {
            return Err(ReelError::training("no training examples"));
        }

        self.reset(options.seed);

        let mut error = f64::INFINITY;
        let mut iterations = 0;
        for iteration in 1..=options.iterations {
            let total: f64 = examples
                .iter()
                .map(|example| self.learn_one(example, options.learning_rate))
                .sum();
            error = total / examples.len() as f64;
            iterations = iteration;

            if !error.is_finite() {
                self.trained = false;
                return Err(ReelError::training(format!(
                    "non-finite error at iteration {iteration}; check feature values"
                )));
            }
            if error < options.error_thresh {
                break;
            }
        }

        self.trained = true;
        debug!(iterations, error, "training run finished");
        Ok(TrainingReport { iterations, error })
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        let input = Array1::from_iter(features.to_vector());
        let activations = self.forward_all(input);
        activations[self.layers.len()][0]
    }

    fn layers(&self) -> Vec<LayerSnapshot> {
        let mut snapshots = vec![LayerSnapshot {
            layer: 0,
            weights: None,
            biases: None,
        }];
        for (idx, layer) in self.layers.iter().enumerate() {
            snapshots.push(LayerSnapshot {
                layer: idx + 1,
                weights: Some(
                    layer
                        .weights
                        .rows()
                        .into_iter()
                        .map(|row| row.to_vec())
                        .collect(),
                ),
                biases: Some(layer.biases.to_vec()),
            });
        }
        snapshots
    }

    fn is_trained(&self) -> bool {
        self.trained
    }
}
