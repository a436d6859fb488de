use tessgeo::compile::{compile_shape, CompileSettings, RawPoint};
use tessgeo::geo::Point;
use tessgeo::quantize::mercator::{point_to_wgs, wgs_to_point};
use tessgeo::simplify::{eliminate_parallel_segments, PARALLEL_EPSILON};
use tessgeo::tessellate::aa::{self, AaVertex, ExtrudeSettings};
use tessgeo::tessellate::ribbon::{self, RibbonSettings};
use tessgeo::tessellate::road::{RoadGeometry, RoadStyle};
use tessgeo::tessellate::{Arena, Color};
use tessgeo::tile::Tile;
use tessgeo::Wgs84;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A few streets around Montreal's Old Port, as (lon, lat).
fn streets() -> Vec<Vec<RawPoint>> {
    vec![
        vec![
            RawPoint(-73.5540, 45.5017), RawPoint(-73.5530, 45.5028), RawPoint(-73.5520, 45.5033),
            RawPoint(-73.5505, 45.5030), RawPoint(-73.5490, 45.5041),
        ],
        vec![
            RawPoint(-73.5600, 45.5000), RawPoint(-73.5580, 45.5000), RawPoint(-73.5560, 45.5000),
            RawPoint(-73.5560, 45.5020),
        ],
    ]
}

#[test]
fn raw_rings_to_ribbon_and_fringe() {
    init_logger();
    let shape = compile_shape(&streets(), &CompileSettings::default());
    assert_eq!(2, shape.parts.len());

    let settings = RibbonSettings::first_pass();
    let total: usize = shape.parts.iter().map(|p| p.len()).sum();
    let mut triangles = Arena::new("triangles", 12 * total);
    let mut outline = Arena::new("outline", 2 * total);
    let mut aa_vertices = Arena::<AaVertex>::new("aa vertices", 4 * total);
    let mut aa_indices = Arena::new("aa indices", 12 * total);

    for part in &shape.parts {
        let start = outline.len();
        let counts = ribbon::tessellate_into(part, 5_000.0, &settings, &mut triangles, &mut outline, None).unwrap();
        assert_eq!(ribbon::triangle_count(part.len(), &settings), counts.triangles);
        assert_eq!(2 * part.len(), counts.outline);

        let ring = outline.as_slice()[start..].to_vec();
        let aa_counts = aa::extrude_into(&ring, 2.0, &ExtrudeSettings::closed(), Color::BLUE, &mut aa_vertices, &mut aa_indices).unwrap();
        assert_eq!(aa::vertex_count(&ring, ExtrudeSettings::closed().closure), aa_counts.vertices);
    }

    assert_eq!(outline.len() * 2, aa_vertices.len());
    assert!(aa_indices.as_slice().iter().all(|&i| (i as usize) < aa_vertices.len()));
}

#[test]
fn road_pipeline_fills_buffers_exactly() {
    init_logger();
    let shape = compile_shape(&streets(), &CompileSettings::default());
    let total: usize = shape.parts.iter().map(|p| p.len()).sum();

    let mut roads = RoadGeometry::with_capacity(total);
    let style = RoadStyle { half_width: 3_000.0, feather_width: 2.0, ..RoadStyle::default() };
    for part in &shape.parts {
        roads.add_road(part, &style).unwrap();
    }

    assert_eq!(roads.aa_vertices.capacity(), roads.aa_vertices.len());
    assert_eq!(roads.aa_indices.capacity(), roads.aa_indices.len());
    assert_eq!(roads.triangles.capacity() - 12 * shape.parts.len(), roads.triangles.len());

    let mut bytes = Vec::new();
    aa::write_vertices_le(roads.aa_vertices.as_slice(), &mut bytes).unwrap();
    assert_eq!(AaVertex::STRIDE * roads.aa_vertices.len(), bytes.len());
}

#[test]
fn compiled_points_land_in_their_tile() {
    let montreal = Wgs84::new(45.5017, -73.5673);
    let point = wgs_to_point(montreal);

    let back = point_to_wgs(point);
    assert!((back.lat - montreal.lat).abs() < 1e-6);
    assert!((back.lon - montreal.lon).abs() < 1e-6);

    let mut tile = Tile::containing(point, 15).unwrap();
    assert!(tile.bounding_box().contains(&point));
    while !tile.is_root() {
        let parent = tile.parent().unwrap();
        assert!(parent.children().unwrap().contains(&tile));
        assert!(parent.bounding_box().contains(&point));
        tile = parent;
    }
}

#[test]
fn preprocessing_makes_straight_roads_tessellate_cleanly() {
    let straight: Vec<Point> = (0..10).map(|i| Point(1_000_000 + i * 1000, 2_000_000)).chain(Some(Point(1_009_000, 2_010_000))).collect();
    let cleaned = eliminate_parallel_segments(&straight, PARALLEL_EPSILON).unwrap();
    assert_eq!(vec![Point(1_000_000, 2_000_000), Point(1_009_000, 2_000_000), Point(1_009_000, 2_010_000)], cleaned);

    let settings = RibbonSettings::first_pass();
    let mut triangles = vec![Point::default(); ribbon::triangle_count(cleaned.len(), &settings)];
    let mut outline = vec![Point::default(); ribbon::outline_count(cleaned.len(), &settings)];
    ribbon::tessellate(&cleaned, 100.0, &settings, &mut triangles, &mut outline, None).unwrap();
    assert_eq!(Point(1_008_900, 2_000_100), outline[1]);
    assert_eq!(Point(1_009_100, 1_999_900), outline[4]);
}
