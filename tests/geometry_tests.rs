mod common;

use common::{numbered_spots, two_spots};
use parkmap::config::LayoutParams;
use parkmap::geometry::{
    compute_layout, grid_cell, ContainerSize, DividerKind, GridGeometry, ImageSize, SpotStyle,
};
use rstest::rstest;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// 1900 / 19 = 100 lane, 600 / 6 = 100 spot height, header 90.
fn container() -> ContainerSize {
    ContainerSize::new(1900.0, 600.0)
}

#[rstest]
#[case(0, 0, 0)]
#[case(8, 0, 8)]
#[case(9, 1, 0)]
#[case(17, 1, 8)]
#[case(19, 2, 1)]
fn test_grid_cell_placement(#[case] index: usize, #[case] row: usize, #[case] col: usize) {
    let cell = grid_cell(index, 9);
    assert_eq!((cell.row, cell.col), (row, col));
}

#[test]
fn test_fallback_sizing_without_image() {
    let geom = GridGeometry::compute(container(), None, &LayoutParams::default()).unwrap();
    assert!(approx(geom.spot_width, 100.0));
    assert!(approx(geom.spot_height, 100.0));
    assert!(approx(geom.lane_width, 100.0));
    assert!(approx(geom.header_offset, 90.0));
}

#[test]
fn test_image_sizing_preferred_when_loaded() {
    let geom = GridGeometry::compute(
        container(),
        Some(ImageSize::new(640.0, 480.0)),
        &LayoutParams::default(),
    )
    .unwrap();
    assert!(approx(geom.spot_width, 64.0));
    assert!(approx(geom.spot_height, 48.0));
    // Lane width always follows the container
    assert!(approx(geom.lane_width, 100.0));
}

#[rstest]
#[case(0.0, 0.0)]
#[case(0.0, 600.0)]
#[case(1900.0, 0.0)]
#[case(-10.0, 600.0)]
#[case(f32::NAN, 600.0)]
fn test_degenerate_container_defers_layout(#[case] w: f32, #[case] h: f32) {
    let layout = compute_layout(
        &two_spots(),
        ContainerSize::new(w, h),
        None,
        &LayoutParams::default(),
    );
    assert!(layout.is_none(), "Layout computed for {}x{}", w, h);
}

#[test]
fn test_spot_positions() {
    let spots = numbered_spots(10);
    let layout = compute_layout(&spots, container(), None, &LayoutParams::default()).unwrap();

    let first = &layout.spots[0].rect;
    assert!(approx(first.x, 100.0) && approx(first.y, 90.0));

    let second = &layout.spots[1].rect;
    assert!(approx(second.x, 300.0) && approx(second.y, 90.0));

    // Index 9 wraps to the second row
    let wrapped = &layout.spots[9];
    assert_eq!((wrapped.cell.row, wrapped.cell.col), (1, 0));
    assert!(approx(wrapped.rect.x, 100.0) && approx(wrapped.rect.y, 290.0));
}

#[test]
fn test_order_is_preserved() {
    let spots = numbered_spots(12);
    let layout = compute_layout(&spots, container(), None, &LayoutParams::default()).unwrap();
    for (i, placed) in layout.spots.iter().enumerate() {
        assert_eq!(placed.index, i);
        assert_eq!(placed.spot, spots[i]);
        assert_eq!(placed.label.text, spots[i].spot_number);
    }
}

#[test]
fn test_occupancy_changes_style_not_geometry() {
    let free = vec![parkmap::model::SpotRecord::new(1, "A1", false)];
    let taken = vec![parkmap::model::SpotRecord::new(1, "A1", true)];
    let params = LayoutParams::default();

    let a = compute_layout(&free, container(), None, &params).unwrap();
    let b = compute_layout(&taken, container(), None, &params).unwrap();

    assert_eq!(a.spots[0].rect, b.spots[0].rect);
    assert_eq!(a.dividers, b.dividers);
    assert_eq!(a.spots[0].style, SpotStyle::Available);
    assert_eq!(b.spots[0].style, SpotStyle::Occupied);
}

#[test]
fn test_empty_spot_list_has_no_shapes() {
    let layout = compute_layout(&[], container(), None, &LayoutParams::default()).unwrap();
    assert!(layout.spots.is_empty());
    assert!(layout.dividers.is_empty());
}

#[test]
fn test_dividers_for_two_full_rows() {
    let spots = numbered_spots(18);
    let layout = compute_layout(&spots, container(), None, &LayoutParams::default()).unwrap();

    let rows: Vec<_> = layout
        .dividers
        .iter()
        .filter(|d| d.kind == DividerKind::Row)
        .collect();
    let cols: Vec<_> = layout
        .dividers
        .iter()
        .filter(|d| d.kind == DividerKind::Column)
        .collect();

    assert_eq!(rows.len(), 1);
    assert_eq!(cols.len(), 8, "Every column boundary except the last");

    let r = rows[0];
    assert!(approx(r.y1, 240.0) && approx(r.y2, 240.0));
    assert!(approx(r.x1, 100.0) && approx(r.x2, 1900.0));

    let c = cols[0];
    assert!(approx(c.x1, 250.0) && approx(c.x2, 250.0));
    assert!(approx(c.y1, 90.0) && approx(c.y2, 490.0));
}

#[test]
fn test_column_dividers_follow_used_columns() {
    let layout = compute_layout(&two_spots(), container(), None, &LayoutParams::default()).unwrap();
    let cols = layout
        .dividers
        .iter()
        .filter(|d| d.kind == DividerKind::Column)
        .count();
    let rows = layout.dividers.len() - cols;
    assert_eq!(cols, 2);
    assert_eq!(rows, 0);
}

#[test]
fn test_custom_column_count() {
    let params = LayoutParams {
        column_count: 4,
        ..Default::default()
    };
    let layout = compute_layout(&numbered_spots(10), container(), None, &params).unwrap();
    assert_eq!(layout.rows(), 3);
    assert_eq!(layout.spots[4].cell.row, 1);
    assert_eq!(layout.spots[4].cell.col, 0);
}

#[test]
fn test_hit_testing() {
    let layout = compute_layout(&two_spots(), container(), None, &LayoutParams::default()).unwrap();

    let hit = layout.spot_at(150.0, 120.0).expect("Inside A1");
    assert_eq!(hit.spot.spot_number, "A1");

    let hit = layout.spot_at(350.0, 120.0).expect("Inside A2");
    assert_eq!(hit.spot.spot_number, "A2");

    // Lane between the two spots
    assert!(layout.spot_at(250.0, 120.0).is_none());
    // Header area
    assert!(layout.spot_at(150.0, 10.0).is_none());
}

#[test]
fn test_label_placement() {
    let layout = compute_layout(&two_spots(), container(), None, &LayoutParams::default()).unwrap();
    let label = &layout.spots[0].label;
    assert!(approx(label.x, 110.0));
    assert!(approx(label.y, 90.0));
    assert!(approx(label.font_size, 30.0));
}
