//! Library root for the `reelsense` crate
//!
//! A small backend that serves an affect-annotated movie dataset, collects
//! pairwise preference feedback, and trains a tiny feed-forward network on
//! demand.

// Core error handling
pub mod api_errors;
pub mod errors;

// Configuration
pub mod config_loader;

// Dataset & feedback state
pub mod dataset;
pub mod feedback;

// Preference model
pub mod model;

// Web server interface
pub mod app_state;
pub mod web;

#[cfg(test)]
mod tests {
    pub mod web;
}

pub use dataset::{load_dataset, MovieRecord};
pub use errors::{ReelError, ReelResult};
pub use feedback::{FeatureVector, FeedbackStore, TrainingExample};
pub use model::{FeedForwardNet, LayerSnapshot, PreferenceModel};
