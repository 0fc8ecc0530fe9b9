//! Pipeline configuration: file locations, year cutoff and indicators.
//!
//! Values are resolved in this order, first match wins:
//! 1. command-line flags ([`Overrides`])
//! 2. the TOML file passed with `--config`
//! 3. `PRICING_ATLAS_DATA_DIR` (data directory only)
//! 4. built-in defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use atlas_ingest::INDICATOR_PREAMBLE_LINES;
use atlas_model::columns::COUNTRY_NAME;
use atlas_model::{IndicatorSpec, ModelError, default_indicators, validate_indicators};
use atlas_transform::DEFAULT_CUTOFF_YEAR;

/// Environment variable for the input data directory.
pub const DATA_DIR_ENV_VAR: &str = "PRICING_ATLAS_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("align_column must not be empty")]
    EmptyAlignColumn,

    #[error(transparent)]
    Indicators(#[from] ModelError),
}

/// Input files, relative to the data directory unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputFiles {
    pub pricing: PathBuf,
    pub metadata: PathBuf,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            pricing: PathBuf::from("Global Netflix Price - by regions(12-2025).csv"),
            metadata: PathBuf::from("Country_Metadata.csv"),
        }
    }
}

/// Output files, relative to the output directory unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputFiles {
    pub pricing: PathBuf,
    pub indicators: PathBuf,
    pub aligned: PathBuf,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            pricing: PathBuf::from("cleaned_netflix_pricing_2025.csv"),
            indicators: PathBuf::from("cleaned_world_bank_data4.csv"),
            aligned: PathBuf::from("aligned_world_bank_data.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the source exports. Defaults to the current directory.
    pub data_dir: Option<PathBuf>,
    /// Directory for produced files. Defaults to the data directory.
    pub output_dir: Option<PathBuf>,
    pub cutoff_year: i32,
    /// Descriptive lines ahead of the header in indicator exports.
    pub preamble_lines: usize,
    /// Column rewritten by the `align` stage.
    pub align_column: String,
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    pub indicators: Vec<IndicatorSpec>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_dir: None,
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            preamble_lines: INDICATOR_PREAMBLE_LINES,
            align_column: COUNTRY_NAME.to_string(),
            inputs: InputFiles::default(),
            outputs: OutputFiles::default(),
            indicators: default_indicators(),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub cutoff_year: Option<i32>,
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Applies command-line values on top of this config.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = Some(dir.clone());
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = Some(dir.clone());
        }
        if let Some(year) = overrides.cutoff_year {
            self.cutoff_year = year;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.align_column.trim().is_empty() {
            return Err(ConfigError::EmptyAlignColumn);
        }
        validate_indicators(&self.indicators)?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| self.data_dir())
    }

    pub fn input_path(&self, file: &Path) -> PathBuf {
        resolve(&self.data_dir(), file)
    }

    pub fn output_path(&self, file: &Path) -> PathBuf {
        resolve(&self.output_dir(), file)
    }
}

/// Loads the config file (if any), fills the data directory from the
/// environment when neither file nor flags set it, applies `overrides`
/// and validates the result.
pub fn load_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<PipelineConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let config = PipelineConfig::from_file(path)?;
            tracing::debug!(path = %path.display(), "loaded config file");
            config
        }
        None => PipelineConfig::default(),
    };
    if config.data_dir.is_none()
        && let Ok(dir) = std::env::var(DATA_DIR_ENV_VAR)
    {
        config.data_dir = Some(PathBuf::from(dir));
    }
    let config = config.with_overrides(overrides);
    config.validate()?;
    Ok(config)
}

fn resolve(base: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        base.join(file)
    }
}
