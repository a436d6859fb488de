use std::fmt;

mod vector;

pub use self::vector::{lines_intersection, Vector};

/// A place in the world square.
///
/// Both axes are quantized to `u32`: longitude runs from 0 (180°W) to 2^32-1
/// (180°E) and projected latitude from 0 (south) to 2^32-1 (north). See
/// `quantize` for the mapping.
///
/// Point is comparable so polylines can be sorted and deduplicated without
/// widening to `f64`.
#[derive(Clone, Copy, Debug, Default, Hash, Ord, Eq, PartialEq, PartialOrd)]
pub struct Point(pub u32, pub u32);

impl Point {
    /// Rounds a world-space vector to the nearest Point.
    ///
    /// Out-of-range components saturate to `0` or `u32::MAX`; tessellated
    /// geometry that hangs over the edge of the world is pinned to it.
    pub fn from_vector(v: Vector) -> Point {
        Point(v.x.round() as u32, v.y.round() as u32)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl From<Vector> for Point {
    fn from(v: Vector) -> Point {
        Point::from_vector(v)
    }
}

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Wgs84 {
    pub lat: f64,
    pub lon: f64,
}

impl Wgs84 {
    pub fn new(lat: f64, lon: f64) -> Wgs84 {
        Wgs84 { lat: lat, lon: lon }
    }
}

impl fmt::Display for Wgs84 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "lat={},lon={}", self.lat, self.lon)
    }
}

/// A square region of the world, anchored at its top-left Point.
///
/// `size` is a `u64` because the root tile spans all 2^32 units of an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub size: u64,
}

impl BoundingBox {
    pub fn top_left(&self) -> Point {
        Point(self.left, self.top)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        self.left as u64 + self.size
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        self.top as u64 + self.size
    }

    pub fn contains(&self, point: &Point) -> bool {
        let x = point.0 as u64;
        let y = point.1 as u64;
        x >= self.left as u64 && x < self.right() && y >= self.top as u64 && y < self.bottom()
    }
}
