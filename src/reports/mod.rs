use chrono::Local;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use parkmap::geometry::{DividerKind, SpotLayout, SpotStyle};
use parkmap::model::SpotRecord;
use parkmap::notify::{Level, Toasts};
use parkmap::reservations::{Page, ReservationColumn};
use std::time::Instant;
use strum::IntoEnumIterator;

pub fn print_notifications(toasts: &Toasts, now: Instant) {
    for note in toasts.visible(now) {
        let icon = match note.level {
            Level::Error => "❌",
            Level::Warning => "⚠️ ",
            Level::Success => "✅",
            Level::Info => "ℹ️ ",
        };
        println!("{} {}", icon, note.message);
    }
}

/// Lot overview in the same row/column order as the map.
pub fn print_spot_grid(spots: &[SpotRecord], cols: usize) {
    if spots.is_empty() {
        println!("\n(no parking spots)");
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for chunk in spots.chunks(cols.max(1)) {
        let cells: Vec<Cell> = chunk
            .iter()
            .map(|s| {
                let cell = Cell::new(&s.spot_number).set_alignment(CellAlignment::Center);
                if s.is_occupied {
                    cell.fg(Color::Red).add_attribute(Attribute::CrossedOut)
                } else {
                    cell.fg(Color::Green)
                }
            })
            .collect();
        table.add_row(cells);
    }
    println!("\n{}", table);
}

pub fn print_spot_summary(spots: &[SpotRecord]) {
    let occupied = spots.iter().filter(|s| s.is_occupied).count();
    println!(
        "Spots: {} ({} occupied, {} available)",
        spots.len(),
        occupied,
        spots.len() - occupied
    );
}

pub fn print_layout_table(layout: &SpotLayout) {
    let g = &layout.geometry;
    println!(
        "\n📐 Spot {:.1}x{:.1}  Lane {:.1}  Header {:.1}  ({} rows x {} cols)",
        g.spot_width,
        g.spot_height,
        g.lane_width,
        g.header_offset,
        layout.rows(),
        g.column_count
    );

    if layout.is_empty() {
        println!("(no spots to place)");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Spot").add_attribute(Attribute::Bold),
        Cell::new("Row"),
        Cell::new("Col"),
        Cell::new("X"),
        Cell::new("Y"),
        Cell::new("W"),
        Cell::new("H"),
        Cell::new("State"),
    ]);
    for i in 1..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for s in &layout.spots {
        let state = match s.style {
            SpotStyle::Available => Cell::new("free").fg(Color::Green),
            SpotStyle::Occupied => Cell::new("occupied").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&s.spot.spot_number).add_attribute(Attribute::Bold),
            Cell::new(s.cell.row),
            Cell::new(s.cell.col),
            Cell::new(format!("{:.1}", s.rect.x)),
            Cell::new(format!("{:.1}", s.rect.y)),
            Cell::new(format!("{:.1}", s.rect.width)),
            Cell::new(format!("{:.1}", s.rect.height)),
            state,
        ]);
    }
    println!("{}", table);

    let rows = layout
        .dividers
        .iter()
        .filter(|d| d.kind == DividerKind::Row)
        .count();
    let cols = layout.dividers.len() - rows;
    println!("Dividers: {} row, {} column", rows, cols);
}

pub fn print_reservation_table(page: &Page<'_>) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        ReservationColumn::iter()
            .map(|c| Cell::new(c.to_string()).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for row in page.rows {
        table.add_row(vec![
            Cell::new(&row.name),
            Cell::new(&row.spot_number),
            Cell::new(row.duration_display()),
            Cell::new(row.start_time_display(&Local)),
        ]);
    }
    println!("{}", table);
    println!("Page {} of {}", page.number, page.total_pages);
}
