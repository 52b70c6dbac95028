use crate::error::Result;
use crate::models::{Dataset, MeasurementRecord};
use crate::processors::ingester::{IngestReport, MeasurementIngester};
use crate::readers::{StationReader, StationRegistry};
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::JsonWriter;
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub years: Vec<IngestReport>,
    pub total_records: usize,
    pub registry_stations: usize,
    /// Registry stations that no yearly file referenced, sorted by id.
    pub idle_stations: Vec<u32>,
}

impl BuildReport {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Dataset Build Report ===\n");
        for year in &self.years {
            summary.push_str(&year.summary());
            summary.push('\n');
        }
        summary.push_str(&format!("Total Records: {}\n", self.total_records));
        summary.push_str(&format!(
            "Stations: {} in registry, {} without measurements\n",
            self.registry_stations,
            self.idle_stations.len()
        ));
        if !self.idle_stations.is_empty() {
            let ids: Vec<String> = self.idle_stations.iter().map(|id| id.to_string()).collect();
            summary.push_str(&format!("  Idle station ids: {}\n", ids.join(", ")));
        }

        summary
    }
}

/// Joins the station registry with every configured year's measurements and
/// writes the consolidated snapshot.
pub struct DatasetBuilder<'a> {
    settings: &'a Settings,
    silent: bool,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            silent: true,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.silent = !show;
        self
    }

    /// Ingest all configured years without writing anything.
    ///
    /// Records are ordered by year, then by their position in the yearly file.
    pub fn consolidate(&self) -> Result<(Vec<MeasurementRecord>, BuildReport)> {
        let registry = StationReader::new().read_stations_map(&self.settings.stations_path())?;
        self.consolidate_with(&registry)
    }

    pub fn consolidate_with(
        &self,
        registry: &StationRegistry,
    ) -> Result<(Vec<MeasurementRecord>, BuildReport)> {
        let years = self.settings.years();
        let year_count = years.clone().count() as u64;
        let progress = ProgressReporter::new(year_count, "Ingesting measurements...", self.silent);

        let ingester = MeasurementIngester::new(registry);
        let mut records = Vec::new();
        let mut reports = Vec::with_capacity(year_count as usize);

        for year in years {
            progress.set_message(&format!("Ingesting {}...", year));
            let ingest = ingester.ingest_file(year, &self.settings.measurement_path(year))?;
            records.extend(ingest.records);
            reports.push(ingest.report);
            progress.increment(1);
        }

        progress.finish_with_message(&format!("Consolidated {} records", records.len()));

        let seen: HashSet<u32> = records.iter().map(|r| r.station_id).collect();
        let mut idle_stations: Vec<u32> = registry
            .keys()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        idle_stations.sort_unstable();

        let report = BuildReport {
            years: reports,
            total_records: records.len(),
            registry_stations: registry.len(),
            idle_stations,
        };

        Ok((records, report))
    }

    /// Rebuild the snapshot from scratch, replacing any previous one.
    pub fn build(&self) -> Result<(Dataset, BuildReport)> {
        let (records, report) = self.consolidate()?;
        let path = self.settings.snapshot_path();

        JsonWriter::new().write_records(&records, &path)?;
        info!(records = records.len(), path = %path.display(), "Wrote consolidated dataset");

        Ok((Dataset::new(records), report))
    }
}
