use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Training hyperparameters, tunable from `reelsense.toml` / `REELSENSE_*` env.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainingConfig {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_error_thresh")]
    pub error_thresh: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Seed for weight initialization; unset means entropy-seeded.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_iterations() -> usize {
    2000
}

fn default_error_thresh() -> f64 {
    0.005
}

fn default_learning_rate() -> f64 {
    0.3
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            error_thresh: default_error_thresh(),
            learning_rate: default_learning_rate(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    #[serde(default = "default_index_path")]
    pub index_path: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub training: TrainingConfig,
}

fn default_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_csv_path() -> String {
    "movies_training.csv".to_string()
}

fn default_index_path() -> String {
    "index.html".to_string()
}

fn default_static_dir() -> String {
    ".".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            csv_path: default_csv_path(),
            index_path: default_index_path(),
            static_dir: default_static_dir(),
            training: TrainingConfig::default(),
        }
    }
}

pub fn load_config() -> Result<AppConfig, figment::Error> {
    let figment = Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file("reelsense.toml"))
        .merge(Env::prefixed("REELSENSE_").split("__"));

    figment.extract()
}
