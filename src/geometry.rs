use serde::{Deserialize, Serialize};

use crate::config::LayoutParams;
use crate::model::SpotRecord;

/// Observed pixel size of the hosting container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite sizes cannot host a layout.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Natural size of the background image, once it has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

impl ImageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub spot_width: f32,
    pub spot_height: f32,
    pub lane_width: f32,
    pub header_offset: f32,
    pub column_count: usize,
}

impl GridGeometry {
    /// Derives the grid metrics. Returns `None` while the container has no
    /// usable size, so callers defer instead of drawing degenerate shapes.
    pub fn compute(
        container: ContainerSize,
        image: Option<ImageSize>,
        params: &LayoutParams,
    ) -> Option<Self> {
        // Zero or non-finite divisors would produce NaN rectangles.
        if !container.is_usable() || params.validate().is_err() {
            return None;
        }

        // Each dimension falls back on its own when the image reports zero.
        let image_w = image.map(|i| i.width).filter(|w| w.is_finite() && *w > 0.0);
        let image_h = image.map(|i| i.height).filter(|h| h.is_finite() && *h > 0.0);

        let spot_width = match image_w {
            Some(w) => w / params.image_divisor,
            None => container.width / params.fallback_width_divisor,
        };
        let spot_height = match image_h {
            Some(h) => h / params.image_divisor,
            None => container.height / params.fallback_height_divisor,
        };

        Some(Self {
            spot_width,
            spot_height,
            lane_width: container.width / params.lane_divisor,
            header_offset: container.height * params.header_fraction,
            column_count: params.column_count,
        })
    }

    pub fn cell(&self, index: usize) -> GridCell {
        grid_cell(index, self.column_count)
    }

    /// Top-left corner of the cell at `(row, col)`.
    pub fn origin(&self, cell: GridCell) -> (f32, f32) {
        let x = self.lane_width + cell.col as f32 * (self.spot_width + self.lane_width);
        let y = self.header_offset + cell.row as f32 * (self.spot_height + self.lane_width);
        (x, y)
    }

    pub fn row_count(&self, spot_count: usize) -> usize {
        spot_count.div_ceil(self.column_count)
    }

    /// Horizontal extent of a full row, from the first lane to the last gutter.
    pub fn grid_right(&self) -> f32 {
        self.lane_width + self.column_count as f32 * (self.spot_width + self.lane_width)
    }

    pub fn grid_bottom(&self, rows: usize) -> f32 {
        self.header_offset + rows as f32 * (self.spot_height + self.lane_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

/// Grid placement depends on index and column count only.
pub fn grid_cell(index: usize, column_count: usize) -> GridCell {
    GridCell {
        row: index / column_count,
        col: index % column_count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotStyle {
    Available,
    Occupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotLabel {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotRect {
    pub index: usize,
    pub cell: GridCell,
    pub rect: Rect,
    pub style: SpotStyle,
    pub label: SpotLabel,
    pub spot: SpotRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DividerKind {
    Row,
    Column,
}

/// Dashed separator line between grid rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub kind: DividerKind,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotLayout {
    pub container: ContainerSize,
    pub geometry: GridGeometry,
    pub spots: Vec<SpotRect>,
    pub dividers: Vec<Divider>,
}

impl SpotLayout {
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.geometry.row_count(self.spots.len())
    }

    pub fn spot_at(&self, x: f32, y: f32) -> Option<&SpotRect> {
        self.spots.iter().find(|s| s.rect.contains(x, y))
    }
}

/// Places every spot on the grid and lays out the separators.
///
/// This is a pure function of its inputs and is meant to be called again on
/// every change of spots, container or image; nothing is retained between calls.
pub fn compute_layout(
    spots: &[SpotRecord],
    container: ContainerSize,
    image: Option<ImageSize>,
    params: &LayoutParams,
) -> Option<SpotLayout> {
    let geometry = GridGeometry::compute(container, image, params)?;

    let rects = spots
        .iter()
        .enumerate()
        .map(|(index, spot)| {
            let cell = geometry.cell(index);
            let (x, y) = geometry.origin(cell);
            SpotRect {
                index,
                cell,
                rect: Rect {
                    x,
                    y,
                    width: geometry.spot_width,
                    height: geometry.spot_height,
                },
                style: if spot.is_occupied {
                    SpotStyle::Occupied
                } else {
                    SpotStyle::Available
                },
                label: SpotLabel {
                    x: x + geometry.spot_width * 0.1,
                    y,
                    font_size: geometry.spot_width.min(geometry.spot_height) * 0.3,
                    text: spot.spot_number.clone(),
                },
                spot: spot.clone(),
            }
        })
        .collect();

    Some(SpotLayout {
        container,
        geometry,
        spots: rects,
        dividers: dividers(&geometry, spots.len()),
    })
}

fn dividers(geometry: &GridGeometry, spot_count: usize) -> Vec<Divider> {
    if spot_count == 0 {
        return Vec::new();
    }

    let rows = geometry.row_count(spot_count);
    let half_lane = geometry.lane_width / 2.0;
    let top = geometry.header_offset;
    let bottom = geometry.grid_bottom(rows);
    let mut out = Vec::new();

    for row in 1..rows {
        let (_, y) = geometry.origin(GridCell { row, col: 0 });
        out.push(Divider {
            kind: DividerKind::Row,
            x1: geometry.lane_width,
            y1: y - half_lane,
            x2: geometry.grid_right(),
            y2: y - half_lane,
        });
    }

    // Only columns that actually hold a spot get a separator, never the last one.
    let used_cols = spot_count.min(geometry.column_count);
    for col in 0..used_cols {
        if col == geometry.column_count - 1 {
            continue;
        }
        let (x, _) = geometry.origin(GridCell { row: 0, col: col + 1 });
        out.push(Divider {
            kind: DividerKind::Column,
            x1: x - half_lane,
            y1: top,
            x2: x - half_lane,
            y2: bottom,
        });
    }

    out
}
