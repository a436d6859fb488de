//! Turns raw GIS rings into parts the tessellators accept.
//!
//! Each ring is clamped to the Mercator-valid range, projected, quantized to
//! `Point`s and stripped of collinear points. Rings too simple to tessellate
//! afterwards are dropped with a warning.

use serde::{Deserialize, Serialize};

use crate::geo::{Point, Wgs84};
use crate::quantize::mercator::wgs_to_point;
use crate::simplify::{eliminate_parallel_segments, PARALLEL_EPSILON};

/// A coordinate pair as GIS files store it: `(x, y)`, meaning longitude then
/// latitude, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawPoint(pub f64, pub f64);

impl From<RawPoint> for Wgs84 {
    fn from(p: RawPoint) -> Wgs84 {
        Wgs84::new(p.1, p.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileSettings {
    pub parallel_epsilon: f64,

    /// Parts with fewer points than this after simplification are dropped.
    pub min_part_points: usize,
}

impl Default for CompileSettings {
    fn default() -> CompileSettings {
        CompileSettings {
            parallel_epsilon: PARALLEL_EPSILON,
            min_part_points: 3,
        }
    }
}

/// The tessellatable parts of one shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompiledShape {
    pub parts: Vec<Vec<Point>>,
}

/// Projects and quantizes every point of `ring`.
pub fn quantize_ring(ring: &[RawPoint]) -> Vec<Point> {
    ring.iter().map(|&p| wgs_to_point(p.into())).collect()
}

/// Compiles one ring, or returns `None` if it's too simple to tessellate.
///
/// # Examples
///
/// ```
/// use tessgeo::compile::{compile_ring, CompileSettings, RawPoint};
///
/// let ring = [RawPoint(0.0, 0.0), RawPoint(5.0, 0.0), RawPoint(10.0, 0.0), RawPoint(10.0, 10.0), RawPoint(0.0, 0.0)];
/// let part = compile_ring(&ring, &CompileSettings::default()).unwrap();
/// assert_eq!(4, part.len());
///
/// let sliver = [RawPoint(0.0, 0.0), RawPoint(5.0, 0.0), RawPoint(10.0, 0.0)];
/// assert_eq!(None, compile_ring(&sliver, &CompileSettings::default()));
/// ```
pub fn compile_ring(ring: &[RawPoint], settings: &CompileSettings) -> Option<Vec<Point>> {
    let points = quantize_ring(ring);
    let simplified = match eliminate_parallel_segments(&points, settings.parallel_epsilon) {
        Ok(simplified) => simplified,
        Err(err) => {
            warn!("dropping ring: {}", err);
            return None;
        }
    };

    if simplified.len() < settings.min_part_points {
        warn!(
            "dropping ring of {} points: {} left after removing collinear points, need {}",
            ring.len(), simplified.len(), settings.min_part_points
        );
        return None;
    }

    Some(simplified)
}

/// Compiles every ring of a shape, keeping the ones that survive.
pub fn compile_shape<R: AsRef<[RawPoint]>>(rings: &[R], settings: &CompileSettings) -> CompiledShape {
    let parts: Vec<Vec<Point>> = rings.iter()
        .filter_map(|ring| compile_ring(ring.as_ref(), settings))
        .collect();
    debug!("compiled shape: kept {} of {} parts", parts.len(), rings.len());
    CompiledShape { parts: parts }
}

#[cfg(test)]
mod test {
    use super::{compile_ring, compile_shape, quantize_ring, CompileSettings, RawPoint};
    use crate::geo::{Point, Wgs84};
    use crate::quantize::mercator::{wgs_to_point, MAX_LATITUDE};
    use crate::quantize::UNIT_MAX;

    fn square(x: f64, y: f64, size: f64) -> Vec<RawPoint> {
        vec![
            RawPoint(x, y),
            RawPoint(x + size, y),
            RawPoint(x + size, y + size),
            RawPoint(x, y + size),
            RawPoint(x, y),
        ]
    }

    #[test]
    fn raw_point_is_lon_lat() {
        assert_eq!(Wgs84::new(45.0, -73.5), Wgs84::from(RawPoint(-73.5, 45.0)));
    }

    #[test]
    fn quantize_clamps_poles() {
        let points = quantize_ring(&[RawPoint(-180.0, -90.0), RawPoint(180.0, 90.0)]);
        assert_eq!(vec![Point(0, 0), Point(UNIT_MAX, UNIT_MAX)], points);
        assert_eq!(points[1], wgs_to_point(Wgs84::new(MAX_LATITUDE, 180.0)));
    }

    #[test]
    fn square_survives_intact() {
        let ring = square(10.0, 20.0, 5.0);
        let part = compile_ring(&ring, &CompileSettings::default()).unwrap();
        assert_eq!(quantize_ring(&ring), part);
    }

    #[test]
    fn collinear_points_are_removed() {
        let ring = [
            RawPoint(0.0, 0.0), RawPoint(5.0, 0.0), RawPoint(10.0, 0.0),
            RawPoint(10.0, 10.0), RawPoint(0.0, 0.0),
        ];
        let part = compile_ring(&ring, &CompileSettings::default()).unwrap();
        assert_eq!(quantize_ring(&[ring[0], ring[2], ring[3], ring[4]]), part);
    }

    #[test]
    fn flat_ring_near_the_pole_is_dropped() {
        let ring = [RawPoint(3.0, -89.0), RawPoint(4.0, -88.0), RawPoint(6.0, -87.0), RawPoint(3.0, -89.0)];
        assert_eq!(None, compile_ring(&ring, &CompileSettings::default()));
    }

    #[test]
    fn shape_keeps_surviving_parts() {
        let _ = env_logger::builder().is_test(true).try_init();

        let rings = vec![
            square(0.0, 0.0, 1.0),
            vec![RawPoint(0.0, 0.0), RawPoint(1.0, 1.0)],
            square(50.0, 50.0, 2.0),
        ];
        let shape = compile_shape(&rings, &CompileSettings::default());
        assert_eq!(2, shape.parts.len());
        assert_eq!(quantize_ring(&rings[2]), shape.parts[1]);
    }

    #[test]
    fn min_part_points_is_configurable() {
        let settings = CompileSettings {
            min_part_points: 6,
            ..CompileSettings::default()
        };
        assert_eq!(None, compile_ring(&square(0.0, 0.0, 1.0), &settings));
    }
}
