pub mod dataset_builder;
pub mod dataset_loader;
pub mod ingester;

pub use dataset_builder::{BuildReport, DatasetBuilder};
pub use dataset_loader::DatasetLoader;
pub use ingester::{IngestReport, MeasurementIngester, YearIngest};
