//! Rows returned by the query layer. Field names are the stable keys the
//! presentation layer binds to.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::Coordinates;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationLocation {
    pub station_name: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAverage {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationAverage {
    pub station_name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improvement,
    /// Also used when the last value equals the first.
    Deterioration,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Improvement => "improvement",
            TrendDirection::Deterioration => "deterioration",
        }
    }
}

/// Endpoint comparison of a pollutant's yearly averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub first_year: i32,
    pub last_year: i32,
    pub first_value: f64,
    pub last_value: f64,
    pub change_percent: f64,
    pub direction: TrendDirection,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:+.1}%) from {} to {}",
            self.direction.label(),
            self.change_percent,
            self.first_year,
            self.last_year
        )
    }
}
