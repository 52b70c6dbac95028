use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Coordinates, Station};

/// One consolidated measurement, enriched with a denormalized copy of its
/// station's name and coordinates. The station registry stays authoritative
/// if the two ever disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub year: i32,

    /// `None` when the source date could not be parsed.
    pub date: Option<NaiveDate>,

    pub station_id: u32,
    pub station_name: String,
    pub coordinates: Coordinates,
    pub pollutant: String,
    pub value: f64,
}

impl MeasurementRecord {
    pub fn new(
        year: i32,
        date: Option<NaiveDate>,
        station: &Station,
        pollutant: String,
        value: f64,
    ) -> Self {
        Self {
            year,
            date,
            station_id: station.id,
            station_name: station.name.clone(),
            coordinates: station.coordinates,
            pollutant,
            value,
        }
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }
}

/// Why a raw measurement entry was left out of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    MissingField(&'static str),
    InvalidStationId,
    InvalidValue,
    UnknownStation(u32),
}

impl SkipReason {
    /// Reason label without the per-entry detail, for grouping counts.
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::MissingField(_) => "missing field",
            SkipReason::InvalidStationId => "invalid station id",
            SkipReason::InvalidValue => "invalid value",
            SkipReason::UnknownStation(_) => "unknown station",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingField(field) => write!(f, "missing field '{}'", field),
            SkipReason::UnknownStation(id) => write!(f, "unknown station {}", id),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Result of validating a single raw entry.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Accepted(MeasurementRecord),
    Skipped(SkipReason),
}
