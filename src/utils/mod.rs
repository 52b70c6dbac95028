pub mod coerce;
pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{centroid, parse_position};
pub use filename::{measurement_file_name, measurement_file_path};
pub use progress::ProgressReporter;
