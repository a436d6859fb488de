//! Unmitered polygon outlines, for inspecting rings.

use crate::error::{require_points, Error, Result};
use crate::geo::{Point, Vector};
use super::{offset, Arena};

/// Outlines a ring with one quad per edge, each pushed `radius` along the
/// edge's left normal.
///
/// The ring's own points must already sit in the vertex buffer at
/// `ring_base..ring_base + ring.len()`. For every edge `a -> b` (including the
/// closing `last -> first`) this appends `a + n` and `b + n` to `vertices` and
/// the triangles `(a, b, a + n)`, `(b, b + n, a + n)` to `indices`.
///
/// Neighboring quads overlap or gap at the corners. Good enough to see a ring,
/// not to draw a road: use `ribbon` for that.
pub fn polygon_outline(
    ring: &[Point],
    ring_base: u32,
    radius: f64,
    vertices: &mut Arena<Point>,
    indices: &mut Arena<u32>,
) -> Result<()> {
    require_points(ring, 3)?;
    let n = ring.len();
    vertices.ensure(2 * n)?;
    indices.ensure(6 * n)?;

    let last = vertices.len() + 2 * n - 1;
    if last > u32::MAX as usize {
        return Err(Error::IndexOverflow(last));
    }
    if ring_base as usize + n - 1 > u32::MAX as usize {
        return Err(Error::IndexOverflow(ring_base as usize + n - 1));
    }

    let new_vertices = vertices.claim(2 * n)?;
    let new_indices = indices.claim(6 * n)?;
    let out_base = new_vertices.base as u32;

    for i in 0..n {
        let j = (i + 1) % n;
        let a = Vector::from(ring[i]);
        let b = Vector::from(ring[j]);
        let normal = offset(b - a, radius);

        new_vertices.items[2 * i] = Point::from_vector(a + normal);
        new_vertices.items[2 * i + 1] = Point::from_vector(b + normal);

        let ia = ring_base + i as u32;
        let ib = ring_base + j as u32;
        let ic = out_base + 2 * i as u32;
        let id = ic + 1;
        new_indices.items[6 * i..6 * i + 6].copy_from_slice(&[ia, ib, ic, ib, id, ic]);
    }

    Ok(())
}
