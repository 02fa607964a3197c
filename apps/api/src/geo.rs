//! Great-circle distance on a spherical Earth model.

use crate::errors::AppError;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two points given in decimal degrees.
/// Symmetric, zero for coincident points, never negative. NaN inputs
/// propagate NaN rather than panicking.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Rejects coordinates a caller should never send: non-finite values or
/// values outside the WGS84 degree ranges.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), AppError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(AppError::Validation(
            "latitude and longitude must be finite numbers".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::Validation(format!(
            "coordinates ({latitude}, {longitude}) are out of range"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coincident_points_are_zero() {
        assert_eq!(distance_meters(31.23, 121.47, 31.23, 121.47), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let d1 = distance_meters(31.23, 121.47, 39.90, 116.40);
        let d2 = distance_meters(39.90, 116.40, 31.23, 121.47);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_half_thousandth_degree_latitude_is_about_55m() {
        let d = distance_meters(31.0, 121.0, 31.0005, 121.0);
        assert!((50.0..=60.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_never_negative() {
        let d = distance_meters(-89.9, -179.9, 89.9, 179.9);
        assert!(d >= 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance_meters(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_validate_accepts_normal_coordinates() {
        assert!(validate_coordinates(31.23, 121.47).is_ok());
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(validate_coordinates(f64::NAN, 121.47).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, 181.0).is_err());
    }
}
