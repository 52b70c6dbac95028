use crate::error::{ProcessingError, Result};
use crate::models::MeasurementRecord;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads and writes the consolidated snapshot as pretty-printed JSON.
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write records, replacing any existing snapshot at `path`.
    ///
    /// The file is written next to its destination and renamed into place, so
    /// readers never see a partial snapshot. Output is deterministic for a
    /// given record sequence.
    pub fn write_records(&self, records: &[MeasurementRecord], path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp.persist(path).map_err(|e| ProcessingError::Io(e.error))?;

        Ok(())
    }

    /// Read a snapshot back.
    pub fn read_records(&self, path: &Path) -> Result<Vec<MeasurementRecord>> {
        let file = File::open(path)?;
        let records = serde_json::from_reader(BufReader::new(file))?;
        Ok(records)
    }

    /// File details for a snapshot whose records are already loaded. Only the
    /// file metadata is read.
    pub fn get_file_info(&self, path: &Path, total_rows: usize) -> Result<SnapshotFileInfo> {
        let file_size = fs::metadata(path)?.len();

        Ok(SnapshotFileInfo {
            total_rows,
            file_size,
        })
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct SnapshotFileInfo {
    pub total_rows: usize,
    pub file_size: u64,
}

impl SnapshotFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Snapshot File Summary:\n\
            - Total rows: {}\n\
            - File size: {:.2} MB",
            self.total_rows,
            self.file_size as f64 / 1_048_576.0
        )
    }
}
