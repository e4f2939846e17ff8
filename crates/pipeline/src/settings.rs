//! Pipeline Settings

use config::{Config, ConfigError, Environment, File};
use eeg_preprocess::PreprocessOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "eeg-pipeline";

/// Environment variable prefix, e.g. `EEG_PIPELINE_SESSIONS_DIR`
pub const ENV_PREFIX: &str = "EEG_PIPELINE";

/// Batch runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root holding one directory of session CSVs per participant
    pub sessions_dir: PathBuf,
    /// Participant registry CSV
    pub registry_path: Option<PathBuf>,
    /// Where to write the cleaned, merged records
    pub output_path: Option<PathBuf>,
    /// Where to write the participant summary as JSON
    pub summary_json: Option<PathBuf>,
    /// Participant IDs to exclude
    pub excluded_participants: Vec<String>,
    /// Neural diagnoses to exclude
    pub excluded_diagnoses: Vec<String>,
    /// Include the one-row-per-participant table in the report
    pub emit_table: bool,
    /// Session cleaning options
    pub preprocess: PreprocessOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from("data/sessions"),
            registry_path: None,
            output_path: None,
            summary_json: None,
            excluded_participants: Vec::new(),
            excluded_diagnoses: Vec::new(),
            emit_table: true,
            preprocess: PreprocessOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from a config file layered under `EEG_PIPELINE_*` environment variables.
    ///
    /// An explicit path must exist; without one, `eeg-pipeline.{toml,json,yaml}`
    /// is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("excluded_participants")
                    .with_list_parse_key("excluded_diagnoses")
                    .with_list_parse_key("preprocess.frequency_bands")
                    .with_list_parse_key("preprocess.electrode_channels"),
            )
            .build()?
            .try_deserialize()
    }
}
