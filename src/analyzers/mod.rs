pub mod dashboard;
pub mod pollutant_analyzer;

pub use dashboard::{DashboardView, TrendView};
pub use pollutant_analyzer::{DatasetSummary, GeographicBounds, PollutantAnalyzer};
