use crate::error::Result;
use crate::models::{IngestOutcome, MeasurementRecord, SkipReason};
use crate::readers::{MeasurementReader, RawMeasurement, StationRegistry};
use crate::utils::coerce;
use crate::utils::constants::{
    ENTRY_DATE_KEY, ENTRY_POLLUTANT_KEY, ENTRY_STATION_KEY, ENTRY_VALUE_KEY,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

const REQUIRED_FIELDS: [&str; 4] = [
    ENTRY_STATION_KEY,
    ENTRY_DATE_KEY,
    ENTRY_POLLUTANT_KEY,
    ENTRY_VALUE_KEY,
];

/// Per-year ingestion tally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub year: i32,
    pub entries: usize,
    pub accepted: usize,
    /// Accepted records whose date could not be parsed.
    pub undated: usize,
    pub skipped: BTreeMap<&'static str, usize>,
}

impl IngestReport {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &IngestOutcome) {
        self.entries += 1;
        match outcome {
            IngestOutcome::Accepted(record) => {
                self.accepted += 1;
                if !record.has_date() {
                    self.undated += 1;
                }
            }
            IngestOutcome::Skipped(reason) => {
                *self.skipped.entry(reason.kind()).or_insert(0) += 1;
            }
        }
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn skipped_for(&self, kind: &str) -> usize {
        self.skipped.get(kind).copied().unwrap_or(0)
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{}: {} entries, {} accepted, {} skipped",
            self.year,
            self.entries,
            self.accepted,
            self.skipped_total()
        );
        if self.undated > 0 {
            summary.push_str(&format!(", {} without a usable date", self.undated));
        }
        for (kind, count) in &self.skipped {
            summary.push_str(&format!("\n  - {}: {}", kind, count));
        }
        summary
    }
}

/// Output of ingesting one year.
#[derive(Debug, Clone)]
pub struct YearIngest {
    pub records: Vec<MeasurementRecord>,
    pub report: IngestReport,
}

/// Validates raw measurement entries against the station registry and turns
/// them into consolidated records.
pub struct MeasurementIngester<'a> {
    registry: &'a StationRegistry,
    reader: MeasurementReader,
}

impl<'a> MeasurementIngester<'a> {
    pub fn new(registry: &'a StationRegistry) -> Self {
        Self {
            registry,
            reader: MeasurementReader::new(),
        }
    }

    /// Validate a single entry. Checks run in a fixed order and the first
    /// failure decides the skip reason.
    pub fn ingest_entry(&self, year: i32, entry: &RawMeasurement) -> IngestOutcome {
        if let Some(field) = REQUIRED_FIELDS.iter().find(|key| !entry.contains_key(**key)) {
            return IngestOutcome::Skipped(SkipReason::MissingField(*field));
        }

        let Some(station_id) = coerce::to_station_id(&entry[ENTRY_STATION_KEY]) else {
            return IngestOutcome::Skipped(SkipReason::InvalidStationId);
        };
        let Some(value) = coerce::to_value(&entry[ENTRY_VALUE_KEY]) else {
            return IngestOutcome::Skipped(SkipReason::InvalidValue);
        };
        let Some(station) = self.registry.get(&station_id) else {
            return IngestOutcome::Skipped(SkipReason::UnknownStation(station_id));
        };
        let Some(pollutant) = coerce::to_code(&entry[ENTRY_POLLUTANT_KEY]) else {
            return IngestOutcome::Skipped(SkipReason::MissingField(ENTRY_POLLUTANT_KEY));
        };

        let date = coerce::to_date(&entry[ENTRY_DATE_KEY]);

        IngestOutcome::Accepted(MeasurementRecord::new(year, date, station, pollutant, value))
    }

    /// Validate every entry of one year, keeping file order.
    pub fn ingest_entries(&self, year: i32, entries: &[RawMeasurement]) -> YearIngest {
        let mut report = IngestReport::new(year);
        let mut records = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let outcome = self.ingest_entry(year, entry);
            report.record(&outcome);

            match outcome {
                IngestOutcome::Accepted(record) => records.push(record),
                IngestOutcome::Skipped(reason) => {
                    debug!(year, index, %reason, "Skipping measurement entry");
                }
            }
        }

        YearIngest { records, report }
    }

    /// Read and validate the measurement file for `year`.
    pub fn ingest_file(&self, year: i32, path: &Path) -> Result<YearIngest> {
        let entries = self.reader.read_entries(path)?;
        let ingest = self.ingest_entries(year, &entries);

        info!(
            year,
            accepted = ingest.report.accepted,
            skipped = ingest.report.skipped_total(),
            "Ingested measurements"
        );

        Ok(ingest)
    }
}
