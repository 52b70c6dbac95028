use serde::{Deserialize, Serialize};
use validator::Validate;

/// A longitude/latitude pair, serialized in GeoJSON order as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.longitude, c.latitude]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Station {
    pub id: u32,

    #[validate(length(min = 1))]
    pub name: String,

    pub pollutants: Vec<String>,

    #[validate(nested)]
    pub coordinates: Coordinates,
}

impl Station {
    pub fn new(id: u32, name: String, pollutants: Vec<String>, coordinates: Coordinates) -> Self {
        Self {
            id,
            name,
            pollutants,
            coordinates,
        }
    }
}
