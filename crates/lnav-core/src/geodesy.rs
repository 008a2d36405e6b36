//! Great-circle math for bearings, distances and projected positions.
//!
//! All angles are in degrees (0 = north, 90 = east) and all distances in
//! nautical miles on a spherical earth.

use crate::models::Coordinates;

/// Mean earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.1;

/// Normalize an angle into [0, 360).
pub fn normalize_360(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Normalize an angle into (-180, 180].
pub fn normalize_180(angle_deg: f64) -> f64 {
    let wrapped = normalize_360(angle_deg);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Signed smallest rotation taking bearing `from_deg` onto bearing `to_deg`.
///
/// Positive values are clockwise. Result is in (-180, 180].
pub fn angle_diff(from_deg: f64, to_deg: f64) -> f64 {
    normalize_180(to_deg - from_deg)
}

/// The opposite bearing.
pub fn reciprocal(bearing_deg: f64) -> f64 {
    normalize_360(bearing_deg + 180.0)
}

/// Initial great-circle heading from `from` to `to`, in [0, 360).
pub fn bearing_deg(from: Coordinates, to: Coordinates) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_lambda = (to.lon - from.lon).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_360(x.atan2(y).to_degrees())
}

/// Great-circle distance in nautical miles (haversine formula).
pub fn distance_nm(from: Coordinates, to: Coordinates) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let dphi = (to.lat - from.lat).to_radians();
    let dlambda = (to.lon - from.lon).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_NM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Position reached by travelling `distance_nm` along the great circle that
/// leaves `origin` on `bearing_deg`.
pub fn destination(origin: Coordinates, bearing_deg: f64, distance_nm: f64) -> Coordinates {
    if distance_nm.abs() <= f64::EPSILON {
        return origin;
    }

    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let bearing_rad = bearing_deg.to_radians();
    let angular_distance = distance_nm / EARTH_RADIUS_NM;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let lon2 = lon1 + y.atan2(x);

    Coordinates::new(lat2.to_degrees(), normalize_180(lon2.to_degrees()))
}
