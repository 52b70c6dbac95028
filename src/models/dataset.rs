use crate::models::MeasurementRecord;
use std::sync::Arc;

/// Read-only handle over the consolidated measurement records.
///
/// Cloning is cheap; the records are shared. A rebuild produces a new
/// `Dataset` rather than mutating an existing one.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[MeasurementRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeasurementRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
