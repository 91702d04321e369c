/// Converts an angle expressed in degrees, minutes and seconds to
/// decimal degrees.
pub fn dms_to_dd(deg: f64, min: f64, sec: f64) -> f64 {
    deg + min / 60.0 + sec / 3600.0
}

/// The Earth's maximum latitude, north or south of the Equator.
pub const LAT_MAX: f64 = 90.0;

/// The Earth's maximum longitude, east or west of the Prime meridian.
pub const LON_MAX: f64 = 180.0;

/// Returns `false` if either coordinate is NaN or outside the valid
/// range for its axis.
pub fn in_valid_range(latitude: f64, longitude: f64) -> bool {
    !latitude.is_nan()
        && !longitude.is_nan()
        && latitude.abs() <= LAT_MAX
        && longitude.abs() <= LON_MAX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dms_conversion() {
        assert_eq!(dms_to_dd(10.0, 0.0, 0.0), 10.0);
        assert_eq!(dms_to_dd(10.0, 30.0, 0.0), 10.5);
        assert!((dms_to_dd(53.0, 19.0, 35.11) - 53.326_419_4).abs() < 1e-6);
    }

    #[test]
    fn range_validation() {
        assert!(in_valid_range(45.0, -120.0));
        assert!(in_valid_range(-90.0, 180.0));
        assert!(!in_valid_range(90.5, 0.0));
        assert!(!in_valid_range(0.0, -180.5));
        assert!(!in_valid_range(f64::NAN, 0.0));
        assert!(!in_valid_range(0.0, f64::NAN));
    }
}
