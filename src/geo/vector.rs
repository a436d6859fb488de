use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use super::Point;

/// A displacement (or position) in world space, in `f64`.
///
/// Points are stored as `u32`; every geometric computation widens them to
/// Vectors first.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Vector {
        Vector { x: x, y: y }
    }

    /// The displacement `a -> b`.
    pub fn between(a: Point, b: Point) -> Vector {
        Vector::from(b) - Vector::from(a)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar cross product: the determinant of the 2x2 matrix `[self, other]`.
    pub fn cross(self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length2(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length2().sqrt()
    }

    /// Unit vector in the same direction. Zero stays zero.
    pub fn normalized(self) -> Vector {
        let len = self.length();
        if len == 0.0 {
            Vector::ZERO
        } else {
            self / len
        }
    }

    /// Rotated 90° counter-clockwise: `(x, y) -> (-y, x)`.
    pub fn perpendicular(self) -> Vector {
        Vector::new(-self.y, self.x)
    }
}

impl From<Point> for Vector {
    fn from(p: Point) -> Vector {
        Vector::new(p.0 as f64, p.1 as f64)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, s: f64) -> Vector {
        Vector::new(self.x * s, self.y * s)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, s: f64) -> Vector {
        Vector::new(self.x / s, self.y / s)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

/// Returns where the line through `a` and `b` crosses the line through `p` and
/// `q`.
///
/// These are infinite lines, not segments: the crossing may lie outside both
/// pairs. Returns `None` when the lines are parallel, i.e. the determinant of
/// their directions is smaller than `epsilon` in magnitude. A NaN determinant
/// (zero-length direction) also counts as parallel.
///
/// # Examples
///
/// ```
/// use tessgeo::geo::{lines_intersection, Vector};
///
/// let hit = lines_intersection(
///     Vector::new(0.0, 0.0), Vector::new(10.0, 0.0),
///     Vector::new(5.0, -5.0), Vector::new(5.0, 5.0),
///     1e-5,
/// );
/// assert_eq!(Some(Vector::new(5.0, 0.0)), hit);
///
/// let parallel = lines_intersection(
///     Vector::new(0.0, 0.0), Vector::new(10.0, 0.0),
///     Vector::new(20.0, 0.0), Vector::new(30.0, 0.0),
///     1e-5,
/// );
/// assert_eq!(None, parallel);
/// ```
pub fn lines_intersection(a: Vector, b: Vector, p: Vector, q: Vector, epsilon: f64) -> Option<Vector> {
    // Cramer's rule on a + t*s1 = p + s*s2.
    let s1 = b - a;
    let s2 = q - p;

    let det = s1.cross(s2);
    if !(det.abs() >= epsilon) {
        return None;
    }

    let ap = a - p;
    let t = s2.cross(ap) / det;
    Some(a + s1 * t)
}
