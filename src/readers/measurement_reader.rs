use crate::error::{ProcessingError, Result};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A measurement entry exactly as it appears in a yearly file. Fields are
/// checked and coerced later, during ingestion.
pub type RawMeasurement = Map<String, Value>;

/// Reads one yearly measurement file: a JSON array of objects.
pub struct MeasurementReader;

impl MeasurementReader {
    pub fn new() -> Self {
        Self
    }

    /// Read all entries of a yearly file. A missing or unparsable file is a
    /// provisioning failure; entries that are not JSON objects are kept as
    /// empty entries so they count as skipped rather than vanish.
    pub fn read_entries(&self, path: &Path) -> Result<Vec<RawMeasurement>> {
        let file = File::open(path).map_err(|e| ProcessingError::provisioning(path, e))?;
        let entries: Vec<Value> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ProcessingError::provisioning(path, e))?;

        Ok(entries
            .into_iter()
            .map(|entry| match entry {
                Value::Object(map) => map,
                _ => Map::new(),
            })
            .collect())
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_entries() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"[
                {{"stazione_id": "1", "data": "2020-01-01", "inquinante": "NO2", "valore": "10"}},
                {{"stazione_id": 2, "data": "2020-01-02", "inquinante": "PM10", "valore": null}},
                42
            ]"#
        )?;

        let entries = MeasurementReader::new().read_entries(file.path())?;

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["inquinante"], "NO2");
        assert!(entries[1]["valore"].is_null());
        assert!(entries[2].is_empty());
        Ok(())
    }

    #[test]
    fn test_unparsable_file_is_provisioning_error() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{{ not json")?;

        let result = MeasurementReader::new().read_entries(file.path());
        assert!(matches!(result, Err(ProcessingError::Provisioning { .. })));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_provisioning_error() {
        let result = MeasurementReader::new().read_entries(Path::new("/nonexistent/2020.json"));
        assert!(matches!(result, Err(ProcessingError::Provisioning { .. })));
    }
}
