use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fmi_model::{Category, ExportSummary};

pub fn print_summary(summary: &ExportSummary) {
    println!("Reports: {}", summary.report_count);
    println!("Output: {}", summary.output_dir.display());
    if let Some(path) = &summary.workbook {
        println!("Workbook: {}", path.display());
    }
    println!("{}", summary_table(summary));
}

/// Row counts per table with a total row.
pub fn summary_table(summary: &ExportSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Description"),
        header_cell("Rows"),
        header_cell("Dropped"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_rows = 0usize;
    for entry in &summary.tables {
        total_rows += entry.rows;
        table.add_row(vec![
            table_cell(entry.category),
            Cell::new(entry.category.label()),
            Cell::new(entry.rows),
            dropped_cell(entry.dropped_rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All tables")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dropped_cell(summary.total_dropped_rows()).add_attribute(Attribute::Bold),
    ]);
    table
}

fn table_cell(category: Category) -> Cell {
    let cell = Cell::new(category.table_name());
    if category.is_joined() {
        cell
    } else {
        cell.add_attribute(Attribute::Bold)
    }
}

fn dropped_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
