use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use crate::processors::DatasetBuilder;
use crate::settings::Settings;
use crate::writers::JsonWriter;
use std::path::Path;
use tracing::{info, warn};

/// Rebuilds allowed per load: an empty snapshot is rebuilt once, never more.
const MAX_REBUILDS: usize = 1;

/// Opens the consolidated snapshot, rebuilding it from the source files when
/// it is absent, unreadable or empty.
pub struct DatasetLoader<'a> {
    settings: &'a Settings,
    show_progress: bool,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn load_or_rebuild(&self) -> Result<Dataset> {
        let path = self.settings.snapshot_path();
        let mut rebuilds = 0;

        if !path.exists() {
            info!(path = %path.display(), "No consolidated dataset found, building");
            self.rebuild()?;
            rebuilds += 1;
        }

        loop {
            let dataset = self.load_snapshot(&path);
            if !dataset.is_empty() {
                info!(
                    records = dataset.len(),
                    path = %path.display(),
                    "Loaded consolidated dataset"
                );
                return Ok(dataset);
            }

            if rebuilds >= MAX_REBUILDS {
                return Err(ProcessingError::EmptyDataset { path });
            }

            warn!(path = %path.display(), "Consolidated dataset is empty, rebuilding");
            self.rebuild()?;
            rebuilds += 1;
        }
    }

    /// Load the snapshot as-is. Missing or unparsable files load as empty.
    pub fn load_snapshot(&self, path: &Path) -> Dataset {
        match JsonWriter::new().read_records(path) {
            Ok(records) => Dataset::new(records),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read consolidated dataset");
                Dataset::default()
            }
        }
    }

    fn rebuild(&self) -> Result<()> {
        let (dataset, _report) = DatasetBuilder::new(self.settings)
            .with_progress(self.show_progress)
            .build()?;
        info!(records = dataset.len(), "Rebuilt consolidated dataset");
        Ok(())
    }
}
