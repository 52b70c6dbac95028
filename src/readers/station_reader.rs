use crate::error::{ProcessingError, Result};
use crate::models::Station;
use crate::utils::coerce::{to_code, to_station_id};
use crate::utils::constants::{REGISTRY_ID_KEY, REGISTRY_NAME_KEY, REGISTRY_POLLUTANTS_KEY};
use crate::utils::coordinates::parse_position;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};
use validator::Validate;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Map<String, Value>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Value,
}

/// Station registry lookup keyed by station identifier.
pub type StationRegistry = HashMap<u32, Station>;

/// Reads the station GeoJSON feature collection. A feature with a missing or
/// non-integer id, a non-string name, a non-list pollutant field or a bad
/// coordinate pair fails the whole read. Empty names and projected
/// coordinates are kept with a warning.
pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read stations in file order.
    pub fn read_stations(&self, path: &Path) -> Result<Vec<Station>> {
        let file = File::open(path).map_err(|e| ProcessingError::provisioning(path, e))?;
        let collection: FeatureCollection = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ProcessingError::provisioning(path, e))?;

        collection
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| self.parse_feature(index, feature))
            .collect()
    }

    fn parse_feature(&self, index: usize, feature: &Feature) -> Result<Station> {
        let props = &feature.properties;
        let field = |key: &str| {
            props.get(key).ok_or_else(|| {
                ProcessingError::InvalidStation(format!("feature {} has no '{}'", index, key))
            })
        };

        let raw_id = field(REGISTRY_ID_KEY)?;
        let id = to_station_id(raw_id).ok_or_else(|| {
            ProcessingError::InvalidStation(format!(
                "feature {} has non-integer station id: {}",
                index, raw_id
            ))
        })?;

        let name = match field(REGISTRY_NAME_KEY)? {
            Value::String(s) => s.clone(),
            other => {
                return Err(ProcessingError::InvalidStation(format!(
                    "station {} has non-string name: {}",
                    id, other
                )))
            }
        };

        let pollutants = field(REGISTRY_POLLUTANTS_KEY)?
            .as_array()
            .ok_or_else(|| {
                ProcessingError::InvalidStation(format!("station {} pollutants are not a list", id))
            })?
            .iter()
            .filter_map(to_code)
            .collect();

        let coordinates = parse_position(&feature.geometry.coordinates)?;

        let station = Station::new(id, name, pollutants, coordinates);
        if let Err(e) = station.validate() {
            warn!(station_id = id, error = %e, "Station outside expected ranges, keeping it");
        }
        Ok(station)
    }

    /// Read stations into a lookup map. Duplicate ids keep the last feature.
    pub fn read_stations_map(&self, path: &Path) -> Result<StationRegistry> {
        let stations = self.read_stations(path)?;
        let mut map = HashMap::with_capacity(stations.len());

        for station in stations {
            if let Some(previous) = map.insert(station.id, station) {
                warn!(
                    station_id = previous.id,
                    name = %previous.name,
                    "Duplicate station id, keeping last"
                );
            }
        }

        debug!(stations = map.len(), path = %path.display(), "Loaded station registry");
        Ok(map)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_registry(features: Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let collection = serde_json::json!({ "type": "FeatureCollection", "features": features });
        write!(file, "{}", collection).unwrap();
        file
    }

    fn feature(id: Value, name: &str, coords: Value) -> Value {
        serde_json::json!({
            "type": "Feature",
            "properties": { "id_amat": id, "nome": name, "inquinanti": ["NO2", "PM10"] },
            "geometry": { "type": "Point", "coordinates": coords }
        })
    }

    #[test]
    fn test_read_stations_file() -> Result<()> {
        let file = write_registry(Value::Array(vec![
            feature(serde_json::json!(1), "A", serde_json::json!([9.0, 45.0])),
            feature(serde_json::json!("2"), "B", serde_json::json!([9.1, 45.1])),
        ]));

        let stations = StationReader::new().read_stations(file.path())?;

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, 1);
        assert_eq!(stations[0].name, "A");
        assert_eq!(stations[0].pollutants, vec!["NO2", "PM10"]);
        assert_eq!(stations[1].id, 2);
        assert_eq!(stations[1].coordinates, Coordinates::new(9.1, 45.1));
        Ok(())
    }

    #[test]
    fn test_malformed_id_is_fatal() {
        let file = write_registry(Value::Array(vec![
            feature(serde_json::json!(1), "A", serde_json::json!([9.0, 45.0])),
            feature(serde_json::json!("north"), "B", serde_json::json!([9.1, 45.1])),
        ]));

        let result = StationReader::new().read_stations(file.path());
        assert!(matches!(result, Err(ProcessingError::InvalidStation(_))));
    }

    #[test]
    fn test_missing_coordinates_is_fatal() {
        let file = write_registry(Value::Array(vec![feature(
            serde_json::json!(1),
            "A",
            serde_json::json!([9.0]),
        )]));

        let result = StationReader::new().read_stations(file.path());
        assert!(matches!(result, Err(ProcessingError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_empty_name_and_projected_coordinates_are_kept() -> Result<()> {
        let file = write_registry(Value::Array(vec![
            feature(serde_json::json!(1), "", serde_json::json!([9.0, 45.0])),
            feature(
                serde_json::json!(2),
                "Projected",
                serde_json::json!([1514000.0, 5034000.0]),
            ),
        ]));

        let stations = StationReader::new().read_stations(file.path())?;

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "");
        assert_eq!(stations[1].coordinates, Coordinates::new(1514000.0, 5034000.0));
        assert!(stations[1].validate().is_err());
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_last_wins() -> Result<()> {
        let file = write_registry(Value::Array(vec![
            feature(serde_json::json!(1), "Old", serde_json::json!([9.0, 45.0])),
            feature(serde_json::json!(1), "New", serde_json::json!([9.1, 45.1])),
        ]));

        let map = StationReader::new().read_stations_map(file.path())?;
        assert_eq!(map.len(), 1);
        assert_eq!(map[&1].name, "New");
        Ok(())
    }

    #[test]
    fn test_missing_registry_is_provisioning_error() {
        let result = StationReader::new().read_stations(Path::new("/nonexistent/stations.geojson"));
        assert!(matches!(result, Err(ProcessingError::Provisioning { .. })));
    }
}
