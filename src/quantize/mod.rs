//! Maps degrees onto the `u32` unit space and back.
//!
//! Each axis is an affine map from a closed degree `Domain` onto
//! `[0, 2^32-1]`: `min` goes to `0` and `max` to `u32::MAX`, exactly. The map is
//! strictly increasing, and `unit_to_degrees(degrees_to_unit(v))` recovers `v`
//! to within ~1e-7°.
//!
//! Latitude is usually stored after the Mercator warp in `mercator`, which
//! stretches ±85.05° onto ±180 "projected degrees". Use `PROJECTED` (and
//! `projected_lat_to_y`) for those values, `LATITUDE` for raw latitude.
//!
//! Callers clamp before quantizing: asking for a value outside the domain is
//! a bug, caught by a debug assertion.

pub mod mercator;

/// Largest coordinate on either axis.
pub const UNIT_MAX: u32 = u32::MAX;

/// A closed range of degrees that one axis spans.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

/// Raw latitude, south to north.
pub const LATITUDE: Domain = Domain { min: -90.0, max: 90.0 };

/// Longitude, west to east.
pub const LONGITUDE: Domain = Domain { min: -180.0, max: 180.0 };

/// Mercator-warped latitude, in the same degree-like units as longitude.
pub const PROJECTED: Domain = Domain { min: -180.0, max: 180.0 };

impl Domain {
    pub const fn new(min: f64, max: f64) -> Domain {
        Domain { min: min, max: max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Quantizes `value` (degrees within `domain`) to units, truncating.
///
/// # Examples
///
/// ```
/// use tessgeo::quantize::{degrees_to_unit, LONGITUDE};
///
/// assert_eq!(0, degrees_to_unit(-180.0, LONGITUDE));
/// assert_eq!(2147483647, degrees_to_unit(0.0, LONGITUDE));
/// assert_eq!(u32::max_value(), degrees_to_unit(180.0, LONGITUDE));
/// ```
pub fn degrees_to_unit(value: f64, domain: Domain) -> u32 {
    debug_assert!(domain.contains(value), "{} is outside [{}, {}]", value, domain.min, domain.max);
    // Operation order is part of the stored format: keep it.
    (UNIT_MAX as f64 / domain.span() * (value - domain.min)) as u32
}

/// Inverse of `degrees_to_unit`.
pub fn unit_to_degrees(unit: u32, domain: Domain) -> f64 {
    domain.span() / UNIT_MAX as f64 * unit as f64 + domain.min
}

pub fn lat_to_y(lat: f64) -> u32 {
    degrees_to_unit(lat, LATITUDE)
}

pub fn y_to_lat(y: u32) -> f64 {
    unit_to_degrees(y, LATITUDE)
}

pub fn lon_to_x(lon: f64) -> u32 {
    degrees_to_unit(lon, LONGITUDE)
}

pub fn x_to_lon(x: u32) -> f64 {
    unit_to_degrees(x, LONGITUDE)
}

/// Quantizes a latitude that has already been through `mercator::project_lat`.
pub fn projected_lat_to_y(projected_lat: f64) -> u32 {
    degrees_to_unit(projected_lat, PROJECTED)
}

pub fn y_to_projected_lat(y: u32) -> f64 {
    unit_to_degrees(y, PROJECTED)
}

#[cfg(test)]
mod test {
    use super::*;

    fn tenths(domain: Domain) -> Vec<f64> {
        let lo = (domain.min * 10.0) as i64;
        let hi = (domain.max * 10.0) as i64;
        (lo..hi + 1).map(|i| i as f64 / 10.0).collect()
    }

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(0, lat_to_y(-90.0));
        assert_eq!(UNIT_MAX, lat_to_y(90.0));
        assert_eq!(0, lon_to_x(-180.0));
        assert_eq!(UNIT_MAX, lon_to_x(180.0));
        assert_eq!(0, projected_lat_to_y(-180.0));
        assert_eq!(UNIT_MAX, projected_lat_to_y(180.0));
    }

    #[test]
    fn endpoints_round_trip_exactly() {
        assert_eq!(-90.0, y_to_lat(0));
        assert_eq!(90.0, y_to_lat(UNIT_MAX));
        assert_eq!(-180.0, x_to_lon(0));
        assert_eq!(180.0, x_to_lon(UNIT_MAX));
    }

    #[test]
    fn latitude_is_strictly_increasing() {
        let values = tenths(LATITUDE);
        assert_eq!(1801, values.len());
        for pair in values.windows(2) {
            assert!(lat_to_y(pair[0]) < lat_to_y(pair[1]), "{} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn longitude_is_strictly_increasing() {
        let values = tenths(LONGITUDE);
        for pair in values.windows(2) {
            assert!(lon_to_x(pair[0]) < lon_to_x(pair[1]), "{} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn round_trip() {
        for &v in &[-90.0, -45.0, 0.0, 45.0, 90.0] {
            assert!((y_to_lat(lat_to_y(v)) - v).abs() < 1e-4, "lat {}", v);
        }
        for &v in &[-180.0, -90.0, -0.5, 0.0, 33.3, 180.0] {
            assert!((x_to_lon(lon_to_x(v)) - v).abs() < 1e-4, "lon {}", v);
        }
    }

    #[test]
    fn reference_values() {
        assert_eq!(1073741823, lat_to_y(-45.0));
        assert_eq!(2147483647, lat_to_y(0.0));
        assert_eq!(3221225471, lat_to_y(45.0));
    }

    #[test]
    fn custom_domain() {
        let domain = Domain::new(0.0, 1.0);
        assert_eq!(0, degrees_to_unit(0.0, domain));
        assert_eq!(UNIT_MAX, degrees_to_unit(1.0, domain));
        assert!((unit_to_degrees(degrees_to_unit(0.25, domain), domain) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn clamp_restricts_to_domain() {
        assert_eq!(90.0, LATITUDE.clamp(91.5));
        assert_eq!(-90.0, LATITUDE.clamp(-100.0));
        assert_eq!(12.0, LATITUDE.clamp(12.0));
    }
}
