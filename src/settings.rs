//! Layered runtime settings: built-in defaults, an optional TOML file, then
//! `AIRQ_*` environment variables. CLI flags are applied on top by the caller.

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, DEFAULT_RANKING_SIZE, ENV_PREFIX,
    MEASUREMENT_FILE_PATTERN, SETTINGS_FILE, SNAPSHOT_FILE, STATIONS_FILE, YEAR_PLACEHOLDER,
};
use crate::utils::filename::measurement_file_path;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub data_dir: PathBuf,

    #[validate(length(min = 1))]
    pub stations_file: String,

    #[validate(length(min = 1))]
    pub measurement_file_pattern: String,

    pub first_year: i32,
    pub last_year: i32,

    #[validate(length(min = 1))]
    pub snapshot_file: String,

    #[validate(range(min = 1))]
    pub ranking_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            stations_file: STATIONS_FILE.to_string(),
            measurement_file_pattern: MEASUREMENT_FILE_PATTERN.to_string(),
            first_year: DEFAULT_FIRST_YEAR,
            last_year: DEFAULT_LAST_YEAR,
            snapshot_file: SNAPSHOT_FILE.to_string(),
            ranking_size: DEFAULT_RANKING_SIZE,
        }
    }
}

impl Settings {
    /// Load settings from `path` (must exist) or from `airq.toml` in the
    /// working directory when present, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let data_dir = defaults.data_dir.to_string_lossy().into_owned();

        let mut builder = Config::builder()
            .set_default("data_dir", data_dir)?
            .set_default("stations_file", defaults.stations_file)?
            .set_default("measurement_file_pattern", defaults.measurement_file_pattern)?
            .set_default("first_year", defaults.first_year as i64)?
            .set_default("last_year", defaults.last_year as i64)?
            .set_default("snapshot_file", defaults.snapshot_file)?
            .set_default("ranking_size", defaults.ranking_size as i64)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml)),
            None => builder.add_source(File::new(SETTINGS_FILE, FileFormat::Toml).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    /// Field-level validation plus the cross-field rules the derive can't express.
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if !self.measurement_file_pattern.contains(YEAR_PLACEHOLDER) {
            return Err(ProcessingError::Config(format!(
                "measurement_file_pattern '{}' must contain {}",
                self.measurement_file_pattern, YEAR_PLACEHOLDER
            )));
        }

        if self.first_year > self.last_year {
            return Err(ProcessingError::Config(format!(
                "first_year {} is after last_year {}",
                self.first_year, self.last_year
            )));
        }

        Ok(())
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    pub fn stations_path(&self) -> PathBuf {
        self.data_dir.join(&self.stations_file)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    pub fn measurement_path(&self, year: i32) -> PathBuf {
        measurement_file_path(&self.data_dir, &self.measurement_file_pattern, year)
    }
}
