use serde::{Deserialize, Serialize};

use crate::error::{require_index_range, require_points, Result};
use crate::geo::Point;
use super::aa::{self, AaVertex, ExtrudeSettings};
use super::ribbon::{self, RibbonSettings};
use super::{Arena, Color};

/// How to draw a road.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadStyle {
    /// Distance from the centerline to the road's edge, in world units.
    pub half_width: f64,

    /// Width of the feathered fringe, in world units.
    pub feather_width: f64,

    pub color: Color,
}

impl Default for RoadStyle {
    fn default() -> RoadStyle {
        RoadStyle {
            half_width: 2000.0,
            feather_width: 1.0,
            color: Color::rgb(0.83, 0.54, 0.55),
        }
    }
}

/// Render data for many roads, in buffers sized once up front.
///
/// Each `add_road()` appends a ribbon body to `triangles` and its feathered
/// fringe to `aa_vertices`/`aa_indices`. The whole lot can then be uploaded
/// as three buffers.
#[derive(Debug)]
pub struct RoadGeometry {
    pub triangles: Arena<Point>,
    pub aa_vertices: Arena<AaVertex>,
    pub aa_indices: Arena<u32>,
    outline: Vec<Point>,
    ribbon: RibbonSettings,
    extrude: ExtrudeSettings,
}

impl RoadGeometry {
    /// Room for `max_points` points' worth of roads in total.
    ///
    /// A road of `N` points takes `12·(N-1)` triangle points, `4N` AA
    /// vertices and `12N` AA indices.
    pub fn with_capacity(max_points: usize) -> RoadGeometry {
        RoadGeometry {
            triangles: Arena::new("road triangles", 12 * max_points),
            aa_vertices: Arena::new("road aa vertices", 4 * max_points),
            aa_indices: Arena::new("road aa indices", 12 * max_points),
            outline: Vec::new(),
            ribbon: RibbonSettings::first_pass(),
            extrude: ExtrudeSettings::closed(),
        }
    }

    /// Tessellates one road.
    ///
    /// Pass one widens the centerline into a two-sided ribbon and records its
    /// outline, a loop around the road. Pass two feathers that loop as a
    /// closed ring.
    ///
    /// Checks every buffer before writing: on error nothing is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessgeo::geo::Point;
    /// use tessgeo::tessellate::road::{RoadGeometry, RoadStyle};
    ///
    /// let mut roads = RoadGeometry::with_capacity(3);
    /// roads.add_road(&[Point(10000, 10000), Point(20000, 10000), Point(20000, 20000)], &RoadStyle::default()).unwrap();
    /// assert_eq!(24, roads.triangles.len());
    /// assert_eq!(12, roads.aa_vertices.len());
    /// assert_eq!(36, roads.aa_indices.len());
    /// ```
    pub fn add_road(&mut self, centerline: &[Point], style: &RoadStyle) -> Result<()> {
        require_points(centerline, 3)?;
        let n = centerline.len();
        let n_outline = ribbon::outline_count(n, &self.ribbon);

        self.triangles.ensure(ribbon::triangle_count(n, &self.ribbon))?;
        // The outline is a closed loop of `n_outline` points, or one fewer if
        // its ends coincide.
        self.aa_vertices.ensure(2 * n_outline)?;
        self.aa_indices.ensure(6 * n_outline)?;
        require_index_range(self.aa_vertices.len(), 2 * n_outline)?;

        self.outline.clear();
        self.outline.resize(n_outline, Point::default());
        {
            let triangles = self.triangles.claim(ribbon::triangle_count(n, &self.ribbon))?;
            ribbon::tessellate(centerline, style.half_width, &self.ribbon, triangles.items, &mut self.outline, None)?;
        }

        let counts = aa::extrude_into(
            &self.outline,
            style.feather_width,
            &self.extrude,
            style.color,
            &mut self.aa_vertices,
            &mut self.aa_indices,
        )?;
        debug!("road: {} points -> {} aa vertices, {} aa indices", n, counts.vertices, counts.indices);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
        self.aa_vertices.clear();
        self.aa_indices.clear();
    }
}

#[cfg(test)]
mod test {
    use super::{RoadGeometry, RoadStyle};
    use crate::error::Error;
    use crate::geo::Point;

    fn style() -> RoadStyle {
        RoadStyle {
            half_width: 100.0,
            feather_width: 2.0,
            ..RoadStyle::default()
        }
    }

    #[test]
    fn two_roads_share_buffers() {
        let mut roads = RoadGeometry::with_capacity(7);
        roads.add_road(&[Point(1000, 1000), Point(2000, 1000), Point(2000, 2000)], &style()).unwrap();
        roads.add_road(&[Point(5000, 5000), Point(6000, 5000), Point(6000, 6000), Point(7000, 6000)], &style()).unwrap();

        assert_eq!(2 * 12 + 3 * 12, roads.triangles.len());
        assert_eq!(12 + 16, roads.aa_vertices.len());
        assert_eq!(36 + 48, roads.aa_indices.len());

        // The second road's indices start after the first road's vertices.
        assert_eq!(&[12, 13, 15, 12, 15, 14], &roads.aa_indices.as_slice()[36..42]);
        let max = roads.aa_indices.as_slice().iter().cloned().max().unwrap();
        assert_eq!(27, max);
    }

    #[test]
    fn fringe_follows_the_road_edge() {
        let mut roads = RoadGeometry::with_capacity(3);
        roads.add_road(&[Point(5000, 5000), Point(6000, 5000), Point(6000, 6000)], &style()).unwrap();
        let vertices = roads.aa_vertices.as_slice();
        assert_eq!(Point(5000, 5100), vertices[0].coords);
        assert_eq!(Point(5900, 5100), vertices[2].coords);
        assert_eq!(Point(5000, 4900), vertices[10].coords);
        assert!(vertices.iter().all(|v| v.color == [0.83, 0.54, 0.55]));
    }

    #[test]
    fn full_buffers_leave_everything_untouched() {
        let mut roads = RoadGeometry::with_capacity(4);
        roads.add_road(&[Point(1000, 1000), Point(2000, 1000), Point(2000, 2000)], &style()).unwrap();

        match roads.add_road(&[Point(0, 0), Point(10, 0), Point(10, 10)], &style()) {
            Err(Error::BufferTooSmall { .. }) => {}
            other => panic!("expected BufferTooSmall, got {:?}", other),
        }
        assert_eq!(24, roads.triangles.len());
        assert_eq!(12, roads.aa_vertices.len());
        assert_eq!(36, roads.aa_indices.len());

        roads.clear();
        assert!(roads.triangles.is_empty());
        roads.add_road(&[Point(1000, 1000), Point(1010, 1000), Point(1010, 1010), Point(1020, 1010)], &style()).unwrap();
    }
}
