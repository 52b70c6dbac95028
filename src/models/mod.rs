pub mod dataset;
pub mod measurement;
pub mod pollutant;
pub mod query;
pub mod station;

pub use dataset::Dataset;
pub use measurement::{IngestOutcome, MeasurementRecord, SkipReason};
pub use pollutant::{Pollutant, PollutantInfo};
pub use query::{DailyValue, StationAverage, StationLocation, Trend, TrendDirection, YearlyAverage};
pub use station::{Coordinates, Station};
