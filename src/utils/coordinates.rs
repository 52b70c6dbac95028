use crate::error::{ProcessingError, Result};
use crate::models::Coordinates;
use serde_json::Value;

/// Read a GeoJSON point position (`[lon, lat, ...]`) into coordinates.
///
/// # Examples
/// ```
/// use airq_processor::utils::parse_position;
///
/// let coords = parse_position(&serde_json::json!([9.19, 45.46])).unwrap();
/// assert_eq!(coords.longitude, 9.19);
/// assert_eq!(coords.latitude, 45.46);
/// ```
pub fn parse_position(position: &Value) -> Result<Coordinates> {
    let parts = position.as_array().ok_or_else(|| {
        ProcessingError::InvalidCoordinate(format!(
            "Expected a coordinate array, got: {}",
            position
        ))
    })?;

    if parts.len() < 2 {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Expected [longitude, latitude], got {} element(s)",
            parts.len()
        )));
    }

    let longitude = parts[0].as_f64().ok_or_else(|| {
        ProcessingError::InvalidCoordinate(format!("Invalid longitude value: '{}'", parts[0]))
    })?;

    let latitude = parts[1].as_f64().ok_or_else(|| {
        ProcessingError::InvalidCoordinate(format!("Invalid latitude value: '{}'", parts[1]))
    })?;

    Ok(Coordinates::new(longitude, latitude))
}

/// Mean position of a set of points, used to centre the station map.
pub fn centroid<'a, I>(points: I) -> Option<Coordinates>
where
    I: IntoIterator<Item = &'a Coordinates>,
{
    let (count, lon_sum, lat_sum) = points
        .into_iter()
        .fold((0usize, 0.0f64, 0.0f64), |(n, lon, lat), c| {
            (n + 1, lon + c.longitude, lat + c.latitude)
        });

    if count == 0 {
        return None;
    }

    Some(Coordinates::new(
        lon_sum / count as f64,
        lat_sum / count as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_position() {
        let coords = parse_position(&json!([9.0, 45.0])).unwrap();
        assert_eq!(coords, Coordinates::new(9.0, 45.0));

        // Altitude is ignored
        let coords = parse_position(&json!([9.0, 45.0, 120.0])).unwrap();
        assert_eq!(coords, Coordinates::new(9.0, 45.0));
    }

    #[test]
    fn test_invalid_positions() {
        assert!(parse_position(&json!([9.0])).is_err());
        assert!(parse_position(&json!("9.0,45.0")).is_err());
        assert!(parse_position(&json!(["9.0", 45.0])).is_err());
    }

    #[test]
    fn test_centroid() {
        let points = [Coordinates::new(9.0, 45.0), Coordinates::new(9.2, 45.2)];
        let center = centroid(&points).unwrap();

        assert!((center.longitude - 9.1).abs() < 1e-9);
        assert!((center.latitude - 45.1).abs() < 1e-9);
        assert!(centroid(&Vec::<Coordinates>::new()).is_none());
    }
}
