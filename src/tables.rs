use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{Estimate, GeoPoint, LocationCache, Selection};

const BAR_WIDTH: f64 = 30.0;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_estimate_table(estimate: &Estimate) -> Table {
    let max = estimate.energy.max();

    let mut table = new_table();
    table.set_header(vec!["Month", "DC energy", ""]);
    for (month, energy) in estimate.energy.iter() {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar_length =
            if max.0 > 0.0 { (energy.0.max(0.0) / max.0 * BAR_WIDTH).round() as usize } else { 0 };
        table.add_row(vec![
            Cell::new(month.name()),
            Cell::new(format!("{energy:.2}")).set_alignment(CellAlignment::Right),
            Cell::new("█".repeat(bar_length)).fg(Color::DarkYellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", estimate.energy.annual_total()))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table
}

pub fn build_selection_table(selection: &Selection) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Location", "Aerator", "Tilt"]);
    table.add_row(vec![
        selection.point.map_or_else(
            || Cell::new("not selected").fg(Color::Red),
            |point| Cell::new(point).fg(Color::Blue),
        ),
        Cell::new(selection.variant),
        Cell::new(selection.tilt),
    ]);
    table
}

/// Cached locations, the selected one highlighted.
pub fn build_locations_table(cache: &LocationCache, selected: Option<GeoPoint>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Latitude", "Longitude", "Downloaded", "File"]);
    for entry in cache.entries() {
        let color = if Some(entry.point) == selected { Color::Blue } else { Color::Green };
        table.add_row(vec![
            Cell::new(entry.point.latitude()).set_alignment(CellAlignment::Right).fg(color),
            Cell::new(entry.point.longitude()).set_alignment(CellAlignment::Right).fg(color),
            Cell::new(entry.modified_at.format("%Y-%m-%d %H:%M")),
            Cell::new(entry.path.display()).add_attribute(Attribute::Dim),
        ]);
    }
    table
}
