use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use seatforge::model::{Class, ClassConfig, SeatAssignment, SeatingEntry};
use std::collections::HashMap;

pub fn print_class_list(classes: &[Class]) {
    if classes.is_empty() {
        println!("No classes yet.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Class").add_attribute(Attribute::Bold),
        Cell::new("Students"),
        Cell::new("Grid"),
        Cell::new("Pref"),
        Cell::new("Forb"),
        Cell::new("Seatings"),
    ]);

    for c in classes {
        let grid = match c.class_config {
            Some(cfg) => format!("{}x{} {}", cfg.rows, cfg.columns, cfg.desk_type),
            None => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(c.id),
            Cell::new(&c.name).add_attribute(Attribute::Bold),
            Cell::new(c.students.len()).set_alignment(CellAlignment::Right),
            Cell::new(grid),
            Cell::new(c.preferences.len()).set_alignment(CellAlignment::Right),
            Cell::new(c.forbidden.len()).set_alignment(CellAlignment::Right),
            Cell::new(c.seatings.len()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn print_validation_report(class: &Class, errors: &[String]) {
    if errors.is_empty() {
        println!("✅ '{}' is ready for seating.", class.name);
        return;
    }

    println!("❌ '{}' has {} problem(s):", class.name, errors.len());
    for e in errors {
        println!("   - {}", e);
    }
}

pub fn print_history(class: &Class) {
    if class.seatings.is_empty() {
        println!("No seatings saved for '{}'.", class.name);
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("ID"),
        Cell::new("Date"),
        Cell::new("Grid"),
        Cell::new("Seats"),
        Cell::new("Fitness").fg(Color::Cyan),
    ]);

    for (i, s) in class.seatings.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&s.id),
            Cell::new(s.date),
            Cell::new(format!("{}x{} {}", s.rows, s.columns, s.desk_type)),
            Cell::new(s.seating.len()).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", s.fitness))
                .fg(Color::Cyan)
                .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

// Larger grids are cut; seats outside are not drawn.
const MAX_GRID_SIDE: i64 = 64;

/// Rows and columns to draw: the stored grid when there is one, else
/// the extent of the seats, never more than `MAX_GRID_SIDE` either way.
fn grid_bounds(entry: &SeatingEntry) -> (i64, i64) {
    let stored_cols =
        ClassConfig::new(entry.rows, entry.columns, entry.desk_type).effective_columns();

    let extent = |f: fn(&SeatAssignment) -> i64| {
        entry
            .seating
            .iter()
            .map(|s| f(s).saturating_add(1))
            .max()
            .unwrap_or(0)
    };

    let rows = if entry.rows > 0 { entry.rows } else { extent(|s| s.row) };
    let cols = if stored_cols > 0 { stored_cols } else { extent(|s| s.col) };
    (rows.clamp(0, MAX_GRID_SIDE), cols.clamp(0, MAX_GRID_SIDE))
}

/// Draws one seating as the room grid, student names in their seats.
pub fn print_seating_grid(class: &Class, entry: &SeatingEntry) {
    let (rows, cols) = grid_bounds(entry);
    let in_grid = |s: &&SeatAssignment| (0..rows).contains(&s.row) && (0..cols).contains(&s.col);
    let by_seat: HashMap<(i64, i64), i64> = entry
        .seating
        .iter()
        .filter(in_grid)
        .map(|s| ((s.row, s.col), s.student_id))
        .collect();

    println!("\nSeating: {}", entry.id);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for r in 0..rows {
        let cells: Vec<Cell> = (0..cols)
            .map(|c| {
                let name = by_seat
                    .get(&(r, c))
                    .map(|&id| class.display_name(id))
                    .unwrap_or_else(|| "-".to_string());
                Cell::new(name).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);

    let hidden = entry.seating.iter().filter(|s| !in_grid(s)).count();
    if hidden > 0 {
        println!("({} seat(s) outside the grid not shown)", hidden);
    }
}
