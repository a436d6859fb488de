//! Mercator pre-warp for latitude.
//!
//! `project_lat` stretches latitude so that the quantized `y` axis is linear
//! in projected latitude: `lat_r -> ln(tan(lat_r / 2 + π/4))`, reported back
//! in degree-like units. ±`MAX_LATITUDE` lands on ±180, the same range as
//! longitude, which makes the world a square.
//!
//! Longitude is not warped; `project_lon` exists so that call sites read the
//! same on both axes.

use std::f64::consts::PI;

use super::{lon_to_x, projected_lat_to_y, x_to_lon, y_to_projected_lat, LONGITUDE, PROJECTED, UNIT_MAX};
use crate::geo::{Point, Wgs84};

/// The latitude Mercator maps to exactly ±180: `atan(sinh(π))`, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

// x * π / 180, in that order, to match stored data bit for bit.
fn deg_to_rad(x: f64) -> f64 {
    x * PI / 180.0
}

fn rad_to_deg(x: f64) -> f64 {
    x * 180.0 / PI
}

/// Projects latitude in radians to Mercator `y` in radians.
pub fn lat_to_y_r(lat_r: f64) -> f64 {
    (lat_r / 2.0 + PI / 4.0).tan().ln()
}

/// Inverse of `lat_to_y_r`.
pub fn y_r_to_lat(y_r: f64) -> f64 {
    y_r.exp().atan() * 2.0 - PI / 2.0
}

pub fn project_lat(lat: f64) -> f64 {
    rad_to_deg(lat_to_y_r(deg_to_rad(lat)))
}

pub fn unproject_lat(projected_lat: f64) -> f64 {
    rad_to_deg(y_r_to_lat(deg_to_rad(projected_lat)))
}

pub fn project_lon(lon: f64) -> f64 {
    lon
}

pub fn unproject_lon(projected_lon: f64) -> f64 {
    projected_lon
}

/// Restricts latitude to the band Mercator can represent.
pub fn clamp_lat_to_valid(lat: f64) -> f64 {
    lat.max(-MAX_LATITUDE).min(MAX_LATITUDE)
}

pub fn clamp_lon_to_valid(lon: f64) -> f64 {
    LONGITUDE.clamp(lon)
}

/// Warps and quantizes latitude in one expression.
///
/// Assumes `lat` is already clamped to ±`MAX_LATITUDE`.
pub fn lat_to_yu(lat: f64) -> u32 {
    ((lat_to_y_r(deg_to_rad(lat)) + PI) / (2.0 * PI) * UNIT_MAX as f64) as u32
}

/// Quantizes longitude in one expression.
pub fn lon_to_xu(lon: f64) -> u32 {
    ((lon + 180.0) / 360.0 * UNIT_MAX as f64) as u32
}

/// Clamps, projects and quantizes a geographic position.
///
/// The projected latitude is clamped again: `project_lat(MAX_LATITUDE)`
/// overshoots 180 by a few ulps.
///
/// # Examples
///
/// ```
/// use tessgeo::geo::{Point, Wgs84};
/// use tessgeo::quantize::mercator::wgs_to_point;
///
/// assert_eq!(Point(2147483647, 2147483647), wgs_to_point(Wgs84::new(0.0, 0.0)));
/// assert_eq!(Point(0, 0), wgs_to_point(Wgs84::new(-89.0, -180.0)));
/// ```
pub fn wgs_to_point(wgs: Wgs84) -> Point {
    let x = project_lon(clamp_lon_to_valid(wgs.lon));
    let y = PROJECTED.clamp(project_lat(clamp_lat_to_valid(wgs.lat)));
    Point(lon_to_x(x), projected_lat_to_y(y))
}

/// Inverse of `wgs_to_point`, up to quantization and clamping.
pub fn point_to_wgs(point: Point) -> Wgs84 {
    Wgs84 {
        lat: unproject_lat(y_to_projected_lat(point.1)),
        lon: unproject_lon(x_to_lon(point.0)),
    }
}
