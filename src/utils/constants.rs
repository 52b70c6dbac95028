/// Station registry (GeoJSON feature properties)
pub const REGISTRY_ID_KEY: &str = "id_amat";
pub const REGISTRY_NAME_KEY: &str = "nome";
pub const REGISTRY_POLLUTANTS_KEY: &str = "inquinanti";

/// Yearly measurement entry keys
pub const ENTRY_STATION_KEY: &str = "stazione_id";
pub const ENTRY_DATE_KEY: &str = "data";
pub const ENTRY_POLLUTANT_KEY: &str = "inquinante";
pub const ENTRY_VALUE_KEY: &str = "valore";

/// File names
pub const STATIONS_FILE: &str = "stations.geojson";
pub const SNAPSHOT_FILE: &str = "dati.json";
pub const SETTINGS_FILE: &str = "airq.toml";
pub const YEAR_PLACEHOLDER: &str = "{year}";
pub const MEASUREMENT_FILE_PATTERN: &str = "{year}_qualita-aria.json";

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "AIRQ";

/// Ingestion defaults
pub const DEFAULT_FIRST_YEAR: i32 = 2016;
pub const DEFAULT_LAST_YEAR: i32 = 2025;

/// Query defaults
pub const DEFAULT_RANKING_SIZE: usize = 5;

/// Accepted measurement date layouts, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Concentration units
pub const UNIT_MICROGRAMS: &str = "µg/m³";
pub const UNIT_MILLIGRAMS: &str = "mg/m³";
