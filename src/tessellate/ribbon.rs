//! First pass: widens a polyline into a ribbon of triangles.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{require_capacity, require_points, Result};
use crate::geo::{Point, Vector};
use crate::simplify::PARALLEL_EPSILON;
use super::{offset, offset_join, Arena, Color, DebugLines, Join};

/// What the ribbon tessellator generates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonSettings {
    /// Also widen to the right of the polyline, not just the left.
    pub generate_both_sides: bool,

    /// Record the ribbon's boundary.
    pub generate_outline: bool,

    /// Record `DebugLines` showing each join's construction.
    pub emit_debug_geometry: bool,

    pub parallel_epsilon: f64,
}

impl RibbonSettings {
    /// Both sides, with outline: the road body, whose outline feeds the AA
    /// pass.
    pub fn first_pass() -> RibbonSettings {
        RibbonSettings {
            generate_both_sides: true,
            generate_outline: true,
            ..RibbonSettings::default()
        }
    }

    /// One side, no outline.
    pub fn aa_pass() -> RibbonSettings {
        RibbonSettings::default()
    }

    fn sides(&self) -> usize {
        if self.generate_both_sides { 2 } else { 1 }
    }
}

impl Default for RibbonSettings {
    fn default() -> RibbonSettings {
        RibbonSettings {
            generate_both_sides: false,
            generate_outline: false,
            emit_debug_geometry: false,
            parallel_epsilon: PARALLEL_EPSILON,
        }
    }
}

/// Elements written by one `tessellate()` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RibbonCounts {
    pub triangles: usize,
    pub outline: usize,
}

/// How many triangle-buffer points `tessellate()` writes for `len` points.
///
/// Six (two triangles) per segment per side.
pub fn triangle_count(len: usize, settings: &RibbonSettings) -> usize {
    len.saturating_sub(1) * 6 * settings.sides()
}

/// How many outline points `tessellate()` writes for `len` points.
pub fn outline_count(len: usize, settings: &RibbonSettings) -> usize {
    if settings.generate_outline {
        len * settings.sides()
    } else {
        0
    }
}

struct TriangleWriter<'a> {
    out: &'a mut [Point],
    n: usize,
}

impl<'a> TriangleWriter<'a> {
    fn triangle(&mut self, p1: Vector, p2: Vector, p3: Vector) {
        self.out[self.n] = Point::from_vector(p1);
        self.out[self.n + 1] = Point::from_vector(p2);
        self.out[self.n + 2] = Point::from_vector(p3);
        self.n += 3;
    }

    fn quad(&mut self, p1: Vector, p2: Vector, p3: Vector, p4: Vector) {
        self.triangle(p1, p2, p3);
        self.triangle(p3, p4, p1);
    }
}

/// Writes the left side front to back and the right side back to front, so a
/// double-sided outline is one loop around the ribbon.
struct OutlineWriter<'a> {
    out: &'a mut [Point],
    len: usize,
    enabled: bool,
    both_sides: bool,
    i: usize,
}

impl<'a> OutlineWriter<'a> {
    fn push(&mut self, d: Vector, e: Vector) {
        if !self.enabled {
            return;
        }
        self.out[self.i] = Point::from_vector(d);
        if self.both_sides {
            self.out[2 * self.len - self.i - 1] = Point::from_vector(e);
        }
        self.i += 1;
    }

    fn written(&self) -> usize {
        if self.both_sides { self.i * 2 } else { self.i }
    }
}

fn join_point(join: Join, i: usize) -> Vector {
    if join.is_degenerate() {
        warn!("parallel offset lines at vertices {},{},{}; using unmitered join", i, i + 1, i + 2);
    }
    join.point()
}

/// Widens `polyline` by `half_width` into `triangles`.
///
/// For every interior vertex `p2` the offset edges meet at a miter point `d`
/// (see `offset_join()`); the quad `(p1, prev_d, d, p2)` becomes two
/// triangles. The first vertex and the last vertex use their one edge's
/// perpendicular. With `generate_both_sides` the same happens mirrored, giving
/// points `e` on the right. With `generate_outline` every `d` (and `e`) also
/// goes to `outline`, `d` at the front and `e` from the back.
///
/// Writes exactly `triangle_count()` triangle points and `outline_count()`
/// outline points. `debug` is filled only when `emit_debug_geometry` is set.
///
/// Fails, having written nothing, when `polyline` has fewer than 3 points or
/// a buffer is too small. Parallel joins are not errors: they fall back to the
/// unmitered offset vertex and log a warning.
///
/// # Examples
///
/// ```
/// use tessgeo::geo::Point;
/// use tessgeo::tessellate::ribbon::{tessellate, RibbonSettings};
///
/// let line = [Point(0, 0), Point(1000, 0), Point(1000, 1000)];
/// let settings = RibbonSettings { generate_outline: true, ..RibbonSettings::default() };
/// let mut triangles = [Point::default(); 12];
/// let mut outline = [Point::default(); 3];
///
/// let counts = tessellate(&line, 100.0, &settings, &mut triangles, &mut outline, None).unwrap();
/// assert_eq!((12, 3), (counts.triangles, counts.outline));
/// assert_eq!([Point(0, 100), Point(900, 100), Point(900, 1000)], outline);
/// ```
pub fn tessellate(
    polyline: &[Point],
    half_width: f64,
    settings: &RibbonSettings,
    triangles: &mut [Point],
    outline: &mut [Point],
    debug: Option<&mut DebugLines>,
) -> Result<RibbonCounts> {
    require_points(polyline, 3)?;
    let len = polyline.len();
    require_capacity("triangles", triangles, triangle_count(len, settings))?;
    require_capacity("outline", outline, outline_count(len, settings))?;

    let both_sides = settings.generate_both_sides;
    let eps = settings.parallel_epsilon;
    let mut debug = if settings.emit_debug_geometry { debug } else { None };
    let mut tris = TriangleWriter { out: triangles, n: 0 };
    let mut outl = OutlineWriter {
        out: outline,
        len: len,
        enabled: settings.generate_outline,
        both_sides: both_sides,
        i: 0,
    };

    let mut prev_d = Vector::ZERO;
    let mut prev_e = Vector::ZERO;

    for (i, (&p1, &p2, &p3)) in polyline.iter().tuple_windows().enumerate() {
        let (p1, p2, p3) = (Vector::from(p1), Vector::from(p2), Vector::from(p3));
        let t1 = offset(p2 - p1, half_width);
        let t2 = offset(p3 - p2, half_width);

        let d_join = offset_join(p1, p2, p3, half_width, eps);
        let d = join_point(d_join, i);
        let e = if both_sides {
            offset_join(p1, p2, p3, -half_width, eps).point()
        } else {
            p2
        };

        if i == 0 {
            prev_d = p1 + t1;
            prev_e = p1 - t1;
            outl.push(prev_d, prev_e);
        }

        if let Some(ref mut lines) = debug {
            lines.add_line(p1, p2, Color::BLACK);
            for &(p, t) in &[(p1, t1), (p2, t1), (p2, t2), (p3, t2)] {
                lines.add_line(p, p + t, Color::GREY);
                if both_sides {
                    lines.add_line(p, p - t, Color::GREY);
                }
            }
            let spoke = if d_join.is_degenerate() { Color::RED } else { Color::GREEN };
            lines.add_line(p2, d, spoke);
            lines.add_line(prev_d, d, Color::BLUE);
            if both_sides {
                lines.add_line(p2, e, spoke);
                lines.add_line(prev_e, e, Color::BLUE);
            }
        }

        tris.quad(p1, prev_d, d, p2);
        if both_sides {
            tris.quad(p1, prev_e, e, p2);
        }
        outl.push(d, e);

        prev_d = d;
        prev_e = e;
    }

    // End cap: the last edge's perpendicular, no miter.
    let p1 = Vector::from(polyline[len - 2]);
    let p2 = Vector::from(polyline[len - 1]);
    let t = offset(p2 - p1, half_width);
    let d = p2 + t;
    let e = p2 - t;

    if let Some(ref mut lines) = debug {
        lines.add_line(p1, p2, Color::BLACK);
        lines.add_line(prev_d, d, Color::BLUE);
        if both_sides {
            lines.add_line(prev_e, e, Color::BLUE);
        }
    }

    outl.push(d, e);
    tris.quad(p1, prev_d, d, p2);
    if both_sides {
        tris.quad(p1, prev_e, e, p2);
    }

    let counts = RibbonCounts {
        triangles: tris.n,
        outline: outl.written(),
    };
    debug!("ribbon: {} points -> {} triangle points, {} outline points", len, counts.triangles, counts.outline);
    Ok(counts)
}

/// `tessellate()` into the next free slots of two arenas.
///
/// Claims exactly `triangle_count()` and `outline_count()` slots. On error
/// neither arena moves.
pub fn tessellate_into(
    polyline: &[Point],
    half_width: f64,
    settings: &RibbonSettings,
    triangles: &mut Arena<Point>,
    outline: &mut Arena<Point>,
    debug: Option<&mut DebugLines>,
) -> Result<RibbonCounts> {
    require_points(polyline, 3)?;
    let n_triangles = triangle_count(polyline.len(), settings);
    let n_outline = outline_count(polyline.len(), settings);
    triangles.ensure(n_triangles)?;
    outline.ensure(n_outline)?;

    let tri_claim = triangles.claim(n_triangles)?;
    let outline_claim = outline.claim(n_outline)?;
    tessellate(polyline, half_width, settings, tri_claim.items, outline_claim.items, debug)
}
