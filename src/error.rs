use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Source file {} unavailable: {reason}", path.display())]
    Provisioning { path: PathBuf, reason: String },

    #[error("Invalid station registry entry: {0}")]
    InvalidStation(String),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Dataset {} has no usable records after rebuild", path.display())]
    EmptyDataset { path: PathBuf },

    #[error(transparent)]
    InsufficientData(#[from] InsufficientData),
}

impl ProcessingError {
    pub fn provisioning(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Provisioning {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Query-level shortfall: the operation is well-defined but the data cannot
/// support an answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsufficientData {
    #[error("no records for pollutant {pollutant}")]
    NoRecords { pollutant: String },

    #[error("pollutant {pollutant} only has data for {year}; a trend needs at least two years")]
    SingleYear { pollutant: String, year: i32 },

    #[error("first yearly average of {pollutant} ({year}) is zero; percentage change is undefined")]
    ZeroBaseline { pollutant: String, year: i32 },

    #[error("no stations recorded {pollutant}")]
    NoStations { pollutant: String },
}
