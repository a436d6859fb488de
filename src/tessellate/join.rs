use crate::geo::{lines_intersection, Vector};

/// Where the offset edges around a vertex meet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Join {
    /// The offset lines intersect here.
    Miter(Vector),

    /// The offset lines are parallel (or an edge has zero length), so there is
    /// no intersection. Holds the vertex pushed out along the incoming edge's
    /// perpendicular: for a straight continuation that's exactly the miter
    /// point; for a full reversal it's a butt end.
    Fallback(Vector),
}

impl Join {
    pub fn point(self) -> Vector {
        match self {
            Join::Miter(p) | Join::Fallback(p) => p,
        }
    }

    pub fn is_degenerate(self) -> bool {
        match self {
            Join::Miter(_) => false,
            Join::Fallback(_) => true,
        }
    }
}

/// The left perpendicular of `edge`, scaled to `width`.
///
/// Negative `width` gives the right side. A zero-length edge has no
/// perpendicular and yields zero.
pub fn offset(edge: Vector, width: f64) -> Vector {
    edge.perpendicular().normalized() * width
}

/// Computes the mitered offset point at `p2` for the path `p1 -> p2 -> p3`.
///
/// ```text
///   ------------o d
///              / \
///  p1 --------o p2\
///            /     \
///                   \
///                    p3
/// ```
///
/// `d` is where the line through `p1 + t1, p2 + t1` meets the line through
/// `p3 + t2, p2 + t2`, with `t1`, `t2` the edges' perpendiculars scaled to
/// `width`. Its distance from `p2` is `width / cos(θ/2)`, θ being the turn
/// angle.
///
/// # Examples
///
/// ```
/// use tessgeo::geo::Vector;
/// use tessgeo::tessellate::{offset_join, Join};
///
/// let join = offset_join(
///     Vector::new(0.0, 0.0), Vector::new(1000.0, 0.0), Vector::new(1000.0, 1000.0),
///     100.0, 1e-5,
/// );
/// assert_eq!(Join::Miter(Vector::new(900.0, 100.0)), join);
/// ```
pub fn offset_join(p1: Vector, p2: Vector, p3: Vector, width: f64, epsilon: f64) -> Join {
    let a = p2 - p1;
    let b = p3 - p2;
    let t1 = offset(a, width);
    let t2 = offset(b, width);

    if a.length2() > 0.0 && b.length2() > 0.0 {
        if let Some(d) = lines_intersection(p1 + t1, p2 + t1, p3 + t2, p2 + t2, epsilon) {
            return Join::Miter(d);
        }
    }

    let t = if a.length2() > 0.0 { t1 } else { t2 };
    Join::Fallback(p2 + t)
}
