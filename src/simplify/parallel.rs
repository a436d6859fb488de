use itertools::Itertools;

use crate::error::{require_points, Result};
use crate::geo::{Point, Vector};

/// Default tolerance for "these two segments are parallel".
///
/// Compared against the unnormalized cross product of two edges, so it is in
/// squared world units: with `u32` coordinates only exact collinearity (or a
/// repeated point) gets under it.
pub const PARALLEL_EPSILON: f64 = 1e-5;

/// Removes points that sit on a straight line between their neighbors.
///
/// Digitized rings often repeat points or carry extra points along straight
/// runs. Those make the miter join at that vertex degenerate, so run this
/// before tessellating.
///
/// Slides a window over triples `(p[l], p[r], p[r+1])`, where `p[l]` is the
/// last point we kept. If `p[l] -> p[r]` and `p[r] -> p[r+1]` are parallel
/// (`|cross| < epsilon`), `p[r]` goes. The first and last points always stay,
/// and the survivors keep their order.
///
/// Fails if `points` has fewer than 3 elements. The result may have only 2.
///
/// # Examples
///
/// ```
/// use tessgeo::geo::Point;
/// use tessgeo::simplify::{eliminate_parallel_segments, PARALLEL_EPSILON};
///
/// let line = vec![Point(0, 0), Point(5, 0), Point(10, 0), Point(10, 10)];
/// assert_eq!(
///     vec![Point(0, 0), Point(10, 0), Point(10, 10)],
///     eliminate_parallel_segments(&line, PARALLEL_EPSILON).unwrap()
/// );
/// ```
pub fn eliminate_parallel_segments(points: &[Point], epsilon: f64) -> Result<Vec<Point>> {
    require_points(points, 3)?;

    let mut keep = vec![true; points.len()];
    let mut l = 0;

    for (r, (&p1, &p2)) in points.iter().tuple_windows().enumerate().skip(1) {
        let a = Vector::between(points[l], p1);
        let b = Vector::between(p1, p2);
        if a.cross(b).abs() < epsilon {
            keep[r] = false;
        } else {
            l = r;
        }
    }

    let ret: Vec<Point> = points.iter()
        .zip(keep.iter())
        .filter(|&(_, &k)| k)
        .map(|(&p, _)| p)
        .collect();

    if ret.len() < points.len() {
        debug!("eliminated {} of {} points", points.len() - ret.len(), points.len());
    }

    Ok(ret)
}

#[cfg(test)]
mod test {
    use super::{eliminate_parallel_segments, PARALLEL_EPSILON};
    use crate::error::Error;
    use crate::geo::{Point, Wgs84};
    use crate::quantize::mercator::wgs_to_point;

    fn eliminate(points: &[Point]) -> Vec<Point> {
        eliminate_parallel_segments(points, PARALLEL_EPSILON).unwrap()
    }

    #[test]
    fn too_short() {
        assert_eq!(
            Err(Error::TooFewPoints { required: 3, actual: 2 }),
            eliminate_parallel_segments(&[Point(0, 0), Point(1, 1)], PARALLEL_EPSILON)
        );
    }

    #[test]
    fn unchanged() {
        let points = vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)];
        assert_eq!(points, eliminate(&points));
    }

    #[test]
    fn straight_run() {
        let points = vec![Point(0, 0), Point(1, 1), Point(2, 2), Point(3, 3), Point(3, 10)];
        assert_eq!(vec![Point(0, 0), Point(3, 3), Point(3, 10)], eliminate(&points));
    }

    #[test]
    fn repeated_point() {
        let points = vec![Point(0, 0), Point(5, 5), Point(5, 5), Point(10, 0)];
        assert_eq!(vec![Point(0, 0), Point(5, 5), Point(10, 0)], eliminate(&points));
    }

    #[test]
    fn backtracking_is_collinear() {
        let points = vec![Point(0, 0), Point(10, 0), Point(4, 0), Point(4, 8)];
        assert_eq!(vec![Point(0, 0), Point(4, 0), Point(4, 8)], eliminate(&points));
    }

    #[test]
    fn keeps_endpoints_of_a_line() {
        let points = vec![Point(0, 7), Point(3, 7), Point(9, 7)];
        assert_eq!(vec![Point(0, 7), Point(9, 7)], eliminate(&points));
    }

    #[test]
    fn idempotent() {
        let points = vec![
            Point(0, 0), Point(2, 0), Point(4, 0), Point(4, 0), Point(4, 3),
            Point(4, 6), Point(1, 9), Point(0, 10), Point(0, 10),
            Point(7, 3), Point(8, 2), Point(9, 1), Point(20, 1), Point(20, 1),
        ];
        let once = eliminate(&points);
        let twice = eliminate(&once);
        assert_eq!(once, twice);
        assert_eq!(points[0], once[0]);
        assert_eq!(points[points.len() - 1], once[once.len() - 1]);
    }

    #[test]
    fn flat_coastline() {
        // A stretch of Antarctic coast, all at the southern clamp latitude.
        let lons = [
            3.7756453790000819, 3.8215438160000872, 4.3893335300000444, 4.3997501960000704,
            6.1833602220000898, 6.1989852220000898, 6.7927352220000898, 6.8078719410000872,
            7.2424422540000819, 7.2504988940000885, 7.6463322270000731, 7.4150496750000912,
            7.9170028000000912, 7.8369246750000912, 9.1574813160000872, 8.9382430350000845,
            9.6557723320000832, 9.6621199880000858, 12.046071811000047, 12.08171634200005,
            12.074473504000082,
        ];
        let points: Vec<Point> = lons.iter()
            .map(|&lon| wgs_to_point(Wgs84::new(-85.051128779806589, lon)))
            .collect();

        let result = eliminate(&points);
        assert_eq!(vec![points[0], points[points.len() - 1]], result);
    }
}
