use crate::utils::constants::YEAR_PLACEHOLDER;
use std::path::{Path, PathBuf};

/// Expand a measurement file pattern for one year,
/// e.g. `{year}_qualita-aria.json` -> `2020_qualita-aria.json`.
pub fn measurement_file_name(pattern: &str, year: i32) -> String {
    pattern.replace(YEAR_PLACEHOLDER, &year.to_string())
}

/// Full path of the measurement file for `year` under `data_dir`.
pub fn measurement_file_path(data_dir: &Path, pattern: &str, year: i32) -> PathBuf {
    data_dir.join(measurement_file_name(pattern, year))
}
