//! Second pass: extrudes a polyline into a thin feathered fringe.
//!
//! Every outline vertex becomes a pair of `AaVertex`es at the same position:
//! an inner one and an outer one carrying the extrusion vector. The shader
//! adds the extrusion after projection, so the fringe stays about a pixel
//! wide at any zoom, and fades alpha from inner to outer.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::{require_capacity, require_index_range, require_points, Result};
use crate::geo::{Point, Vector};
use crate::simplify::PARALLEL_EPSILON;
use super::{offset, offset_join, Arena, Color};

/// Whether the last vertex connects back to the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Closure {
    Open,
    Closed,
}

impl Default for Closure {
    fn default() -> Closure {
        Closure::Open
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeSettings {
    pub closure: Closure,
    pub parallel_epsilon: f64,
}

impl ExtrudeSettings {
    pub fn open() -> ExtrudeSettings {
        ExtrudeSettings::default()
    }

    pub fn closed() -> ExtrudeSettings {
        ExtrudeSettings {
            closure: Closure::Closed,
            ..ExtrudeSettings::default()
        }
    }
}

impl Default for ExtrudeSettings {
    fn default() -> ExtrudeSettings {
        ExtrudeSettings {
            closure: Closure::Open,
            parallel_epsilon: PARALLEL_EPSILON,
        }
    }
}

/// One vertex of the feathered fringe.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AaVertex {
    pub coords: Point,

    /// 1 on the outside edge of the fringe, 0 on the geometry's edge.
    pub is_outer: u8,

    pub color: [f32; 3],

    /// Offset from `coords` to the fringe's outer edge. Zero on inner
    /// vertices.
    pub extent: [f32; 2],
}

impl AaVertex {
    /// Bytes per vertex in the GPU vertex buffer.
    pub const STRIDE: usize = 32;

    /// Writes the vertex in its vertex-buffer layout, little-endian:
    ///
    /// | offset | field |
    /// |---|---|
    /// | 0 | `coords` as 2×`u32` |
    /// | 8 | `is_outer` as `u8`, then 3 padding bytes |
    /// | 12 | `color` as 3×`f32` |
    /// | 24 | `extent` as 2×`f32` |
    pub fn write_le<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.coords.0)?;
        w.write_u32::<LittleEndian>(self.coords.1)?;
        w.write_u8(self.is_outer)?;
        w.write_all(&[0; 3])?;
        for &c in &self.color {
            w.write_f32::<LittleEndian>(c)?;
        }
        for &e in &self.extent {
            w.write_f32::<LittleEndian>(e)?;
        }
        Ok(())
    }
}

/// Writes `vertices` back to back, `AaVertex::STRIDE` bytes each.
pub fn write_vertices_le<W: Write>(vertices: &[AaVertex], w: &mut W) -> io::Result<()> {
    for v in vertices {
        v.write_le(w)?;
    }
    Ok(())
}

/// Receives the offset points `extrude_polyline()` computes.
pub trait ExtrudeHandler {
    /// Called once per vertex `p`, in order, with its offset point `d`.
    fn next(&mut self, p: Vector, d: Vector);

    /// Called after the last vertex.
    fn finish(&mut self, closure: Closure);
}

/// Drops a trailing point that repeats the first, for closed polylines.
fn effective_points(polyline: &[Point], closure: Closure) -> &[Point] {
    match closure {
        Closure::Closed if polyline.len() > 1 && polyline[0] == polyline[polyline.len() - 1] => {
            &polyline[..polyline.len() - 1]
        }
        _ => polyline,
    }
}

/// Walks `polyline`, handing `handler` each vertex with its mitered offset
/// point `width` to the left.
///
/// Open polylines start and end with their one edge's perpendicular. Closed
/// polylines miter every vertex against its wrapped-around neighbors; a final
/// point equal to the first is ignored.
///
/// Parallel joins fall back to the unmitered offset, with a warning.
pub fn extrude_polyline<H: ExtrudeHandler + ?Sized>(
    polyline: &[Point],
    width: f64,
    settings: &ExtrudeSettings,
    handler: &mut H,
) -> Result<()> {
    let points = effective_points(polyline, settings.closure);
    require_points(points, 3)?;
    let m = points.len();

    for i in 0..m {
        let p2 = Vector::from(points[i]);
        let d = match settings.closure {
            Closure::Open if i == 0 => p2 + offset(Vector::from(points[1]) - p2, width),
            Closure::Open if i == m - 1 => p2 + offset(p2 - Vector::from(points[i - 1]), width),
            Closure::Open => join(points[i - 1], points[i], points[i + 1], i - 1, width, settings),
            Closure::Closed => join(points[(i + m - 1) % m], points[i], points[(i + 1) % m], (i + m - 1) % m, width, settings),
        };
        handler.next(p2, d);
    }

    handler.finish(settings.closure);
    Ok(())
}

fn join(p1: Point, p2: Point, p3: Point, first: usize, width: f64, settings: &ExtrudeSettings) -> Vector {
    let j = offset_join(p1.into(), p2.into(), p3.into(), width, settings.parallel_epsilon);
    if j.is_degenerate() {
        warn!("parallel offset lines at {} {} {} (starting at vertex {}); using unmitered join", p1, p2, p3, first);
    }
    j.point()
}

/// Number of vertices `make_geometry()` writes for `polyline`.
pub fn vertex_count(polyline: &[Point], closure: Closure) -> usize {
    2 * effective_points(polyline, closure).len()
}

/// Number of indices `make_geometry()` writes for `polyline`: six per quad.
pub fn index_count(polyline: &[Point], closure: Closure) -> usize {
    let m = effective_points(polyline, closure).len();
    match closure {
        Closure::Open => 6 * m.saturating_sub(1),
        Closure::Closed => 6 * m,
    }
}

/// Elements written by one `make_geometry()` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AaCounts {
    pub vertices: usize,
    pub indices: usize,
}

/// An `ExtrudeHandler` writing `AaVertex` pairs and the quads joining them.
///
/// Indices are absolute: `base` is the position of `vertices[0]` in the full
/// vertex buffer. A handler is sized for one polyline and closure; drive it
/// with `extrude_polyline()` on that same polyline.
#[derive(Debug)]
pub struct PolylineAaHandler<'a> {
    vertices: &'a mut [AaVertex],
    indices: &'a mut [u32],
    base: u32,
    color: [f32; 3],
    n_vertices: usize,
    n_indices: usize,
}

impl<'a> PolylineAaHandler<'a> {
    /// Checks that `polyline` can be extruded into `vertices` and `indices`
    /// with indices starting at `base`.
    ///
    /// Fails when the polyline has fewer than 3 points, a buffer is too small,
    /// or an index would not fit in a `u32`.
    pub fn new(
        polyline: &[Point],
        closure: Closure,
        vertices: &'a mut [AaVertex],
        base: usize,
        indices: &'a mut [u32],
        color: Color,
    ) -> Result<PolylineAaHandler<'a>> {
        require_points(effective_points(polyline, closure), 3)?;
        let n_vertices = vertex_count(polyline, closure);
        require_capacity("aa vertices", vertices, n_vertices)?;
        require_capacity("aa indices", indices, index_count(polyline, closure))?;
        require_index_range(base, n_vertices)?;

        Ok(PolylineAaHandler {
            vertices: vertices,
            indices: indices,
            base: base as u32,
            color: color.to_rgb(),
            n_vertices: 0,
            n_indices: 0,
        })
    }

    pub fn counts(&self) -> AaCounts {
        AaCounts {
            vertices: self.n_vertices,
            indices: self.n_indices,
        }
    }

    fn index(&self, i: usize) -> u32 {
        self.base + i as u32
    }

    /// Two triangles for the quad `p1, prev_d, d, p2`.
    fn quad(&mut self, p1: u32, prev_d: u32, d: u32, p2: u32) {
        let n = self.n_indices;
        self.indices[n..n + 6].copy_from_slice(&[p1, prev_d, d, p1, d, p2]);
        self.n_indices += 6;
    }
}

impl<'a> ExtrudeHandler for PolylineAaHandler<'a> {
    fn next(&mut self, p: Vector, d: Vector) {
        let coords = Point::from_vector(p);
        let extent = d - p;
        let n = self.n_vertices;

        self.vertices[n] = AaVertex {
            coords: coords,
            is_outer: 0,
            color: self.color,
            extent: [0.0, 0.0],
        };
        self.vertices[n + 1] = AaVertex {
            coords: coords,
            is_outer: 1,
            color: self.color,
            extent: [extent.x as f32, extent.y as f32],
        };
        self.n_vertices += 2;

        if n >= 2 {
            let (p1, prev_d, d, p2) = (self.index(n - 2), self.index(n - 1), self.index(n + 1), self.index(n));
            self.quad(p1, prev_d, d, p2);
        }
    }

    fn finish(&mut self, closure: Closure) {
        let n = self.n_vertices;
        if closure == Closure::Closed && n >= 4 {
            let (p1, prev_d, d, p2) = (self.index(n - 2), self.index(n - 1), self.index(1), self.index(0));
            self.quad(p1, prev_d, d, p2);
        }
    }
}

/// Extrudes `polyline` by `width` into `vertices` and `indices`.
///
/// `base` is the index `vertices[0]` will have in the vertex buffer the
/// indices refer to. Writes exactly `vertex_count()` vertices and
/// `index_count()` indices: `(M-1)` quads for an open polyline of `M` points,
/// `M` for a closed one.
///
/// Fails, having written nothing, when the polyline has fewer than 3 points, a
/// buffer is too small, or an index would not fit in a `u32`.
///
/// # Examples
///
/// ```
/// use tessgeo::geo::Point;
/// use tessgeo::tessellate::Color;
/// use tessgeo::tessellate::aa::{make_geometry, AaVertex, ExtrudeSettings};
///
/// let ring = [Point(0, 0), Point(100, 0), Point(100, 100), Point(0, 100)];
/// let mut vertices = [AaVertex::default(); 8];
/// let mut indices = [0u32; 24];
///
/// let counts = make_geometry(&ring, 1.0, &ExtrudeSettings::closed(), Color::BLACK, &mut vertices, 0, &mut indices).unwrap();
/// assert_eq!((8, 24), (counts.vertices, counts.indices));
/// assert_eq!([6, 7, 1, 6, 1, 0], indices[18..]);
/// ```
pub fn make_geometry(
    polyline: &[Point],
    width: f64,
    settings: &ExtrudeSettings,
    color: Color,
    vertices: &mut [AaVertex],
    base: usize,
    indices: &mut [u32],
) -> Result<AaCounts> {
    let mut handler = PolylineAaHandler::new(polyline, settings.closure, vertices, base, indices, color)?;
    extrude_polyline(polyline, width, settings, &mut handler)?;
    Ok(handler.counts())
}

/// `make_geometry()` into the next free slots of two arenas, numbering
/// vertices by their position in `vertices`.
///
/// On error neither arena moves.
pub fn extrude_into(
    polyline: &[Point],
    width: f64,
    settings: &ExtrudeSettings,
    color: Color,
    vertices: &mut Arena<AaVertex>,
    indices: &mut Arena<u32>,
) -> Result<AaCounts> {
    require_points(effective_points(polyline, settings.closure), 3)?;
    let n_vertices = vertex_count(polyline, settings.closure);
    let n_indices = index_count(polyline, settings.closure);
    vertices.ensure(n_vertices)?;
    indices.ensure(n_indices)?;
    require_index_range(vertices.len(), n_vertices)?;

    let vertex_claim = vertices.claim(n_vertices)?;
    let index_claim = indices.claim(n_indices)?;
    make_geometry(polyline, width, settings, color, vertex_claim.items, vertex_claim.base, index_claim.items)
}
