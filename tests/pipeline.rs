// End-to-end tests for the parcel-to-volume pipeline:
//   ingestion, ratio resolution, footprint, floors, extrusion, export.

use approx::assert_relative_eq;
use geo::{Area, Coord, LineString, Polygon, Rect, Rotate};
use parcelmass::{
    derive_footprint, io, largest_polygon, run_batch, AreaTierRule, FixedRule, FrontageRule,
    MassingConfig, ParcelBoundary,
};

fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon<f64> {
    Rect::new(Coord { x, y }, Coord { x: x + w, y: y + h }).to_polygon()
}

fn sample_parcels() -> Vec<ParcelBoundary> {
    let l_shape = Polygon::new(
        LineString::from(vec![(0.0, 0.0), (40.0, 0.0), (40.0, 15.0), (15.0, 15.0), (15.0, 40.0), (0.0, 40.0)]),
        vec![],
    );

    vec![
        ParcelBoundary::new("rect", rect(0.0, 0.0, 60.0, 40.0)),
        ParcelBoundary::new("rotated", rect(100.0, 0.0, 50.0, 12.0).rotate_around_centroid(27.0))
            .with_attribute("building_r", "45%"),
        ParcelBoundary::new("l-shape", l_shape.clone()).with_attribute("floor_r", "180%"),
        ParcelBoundary::new("tiny", rect(300.0, 0.0, 6.0, 5.0)).with_attribute("building_r", 80),
        ParcelBoundary::new("narrow", rect(400.0, 0.0, 80.0, 9.0)).with_attribute("floor_r", 2.5),
    ]
}

#[test]
fn reference_parcel_end_to_end() {
    let config = MassingConfig { setback: 3.0, floor_height: 3.6, ..Default::default() };
    let parcels = [ParcelBoundary::new("demo", rect(0.0, 0.0, 60.0, 40.0))
        .with_attribute("building_r", 0.6)
        .with_attribute("floor_r", 3.0)];

    let out = run_batch(&parcels, &AreaTierRule, &config).unwrap();
    let row = &out.rows[0];

    assert_relative_eq!(row.area, 2400.0);
    assert_relative_eq!(row.width, 60.0, epsilon = 1e-9);
    assert_relative_eq!(row.depth, 40.0, epsilon = 1e-9);
    assert_relative_eq!(row.footprint_area, 1440.0, epsilon = 1e-6);
    assert_eq!(row.floor_count, 5);
    assert_eq!(row.height, 18.0);

    let building = &out.buildings[0];
    assert_eq!(building.id, "demo");
    assert_eq!(building.faces.len(), 4 + 2);
    assert!(building.faces[1].vertices().iter().all(|v| v.z == 18.0));
}

#[test]
fn invariants_hold_across_shapes() {
    let config = MassingConfig { setback: 1.5, max_floors: 12, ..Default::default() };
    let parcels = sample_parcels();
    let out = run_batch(&parcels, &FrontageRule, &config).unwrap();

    assert_eq!(out.rows.len(), parcels.len());
    for ((row, building), parcel) in out.rows.iter().zip(&out.buildings).zip(&parcels) {
        assert_eq!(row.id, parcel.id);
        assert_eq!(building.id, parcel.id);

        assert!(row.footprint_area > 0.0);
        assert!(row.footprint_area <= row.area * row.coverage_ratio + 1e-6, "{}", row.id);
        assert!(row.footprint_area <= row.area);

        let boundary = largest_polygon(&parcel.geometry).unwrap();
        let footprint = derive_footprint(&boundary, row.coverage_ratio, config.setback).unwrap();
        assert_relative_eq!(footprint.area, row.footprint_area);
        assert!(footprint.setback_area < row.area, "{}", row.id);
        assert!(row.footprint_area <= footprint.setback_area + 1e-6, "{}", row.id);
        assert_relative_eq!(building.footprint.unsigned_area(), row.footprint_area);

        assert!((config.min_floors..=config.max_floors).contains(&row.floor_count));
        assert_eq!(row.height, row.floor_count as f64 * config.floor_height);
        assert!(row.width >= row.depth);

        let n = building.footprint.exterior().0.len() - 1;
        assert_eq!(building.faces.len(), n + 2);
        assert!(building.faces.iter().all(|f| f.len() >= 3));
        assert!(building.faces[0].vertices().iter().all(|v| v.z == 0.0));
        assert!(building.faces[1].vertices().iter().all(|v| v.z == row.height));
    }

    // Percent attributes are normalized.
    assert_relative_eq!(out.rows[1].coverage_ratio, 0.45);
    assert_relative_eq!(out.rows[2].floor_area_ratio, 1.8);
    assert_relative_eq!(out.rows[3].coverage_ratio, 0.8);
}

#[test]
fn batch_is_idempotent() {
    let config = MassingConfig::default();
    let parcels = sample_parcels();

    let first = run_batch(&parcels, &AreaTierRule, &config).unwrap();
    let second = run_batch(&parcels, &AreaTierRule, &config).unwrap();
    assert_eq!(first, second);

    let csv_first = io::write_rows_csv_string(&first.rows).unwrap();
    let csv_second = io::write_rows_csv_string(&second.rows).unwrap();
    assert_eq!(csv_first, csv_second);

    let geojson_first = io::buildings_to_geojson_bytes(&first.buildings).unwrap();
    let geojson_second = io::buildings_to_geojson_bytes(&second.buildings).unwrap();
    assert_eq!(geojson_first, geojson_second);
}

#[test]
fn geojson_to_exports() {
    let text = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"id": "p1", "building_r": "50%", "floor_r": "200%"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[30,0],[30,20],[0,20],[0,0]]]}},
            {"type": "Feature", "properties": {"id": "p2"},
             "geometry": {"type": "Polygon", "coordinates": [[[50,0],[90,0],[90,30],[50,30],[50,0]]]}}
        ]
    }"#;

    let parcels = io::parse_parcels_geojson(text).unwrap();
    let out = run_batch(&parcels, &FixedRule(3.0), &MassingConfig::default()).unwrap();

    assert_eq!(out.rows[0].floor_area_ratio, 2.0);
    assert_eq!(out.rows[1].floor_area_ratio, 3.0);

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("result.csv");
    let obj_path = dir.path().join("site.obj");
    let geojson_path = dir.path().join("buildings.geojson");

    io::write_rows_csv(&out.rows, &csv_path).unwrap();
    io::write_obj(&out.buildings, &obj_path).unwrap();
    io::write_buildings_geojson(&out.buildings, &geojson_path).unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);

    let obj = std::fs::read_to_string(&obj_path).unwrap();
    assert_eq!(obj.lines().filter(|l| l.starts_with("g ")).count(), 2);

    let reread = io::read_parcels_geojson(&geojson_path).unwrap();
    assert_eq!(reread.len(), 2);
    assert_eq!(reread[1].id, "p2");
}
