use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use atlas_cli::types::{RunSummary, StageSummary};
use atlas_model::AlignmentTable;

pub fn print_summary(summary: &RunSummary) {
    if summary.dry_run {
        println!("Dry run: no files written");
    }
    if let Some(date) = summary.snapshot_date {
        println!("Pricing snapshot: {date}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for stage in &summary.stages {
        table.add_row(vec![
            Cell::new(stage.stage.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.rows),
            output_cell(stage),
        ]);
    }
    println!("{table}");
    print_details(summary);
}

fn print_details(summary: &RunSummary) {
    if let Some(stats) = &summary.normalize {
        println!(
            "Indicators: {} merged rows, {} before cutoff, {} aggregates, {} renamed, {} without data",
            stats.input_rows,
            stats.before_cutoff,
            stats.without_region,
            stats.renamed,
            stats.empty_indicators
        );
    }
    if let Some(stats) = &summary.align {
        println!(
            "Align: {} exact, {} fallback, {} unchanged",
            stats.exact, stats.fallback, stats.unchanged
        );
    }
    if let Some(coverage) = &summary.coverage {
        println!(
            "Coverage: {} names matched, {} priced countries without indicators",
            coverage.matched.len(),
            coverage.only_right.len()
        );
        for name in &coverage.only_right {
            eprintln!("- {name}");
        }
    }
}

pub fn print_aliases(tables: &[AlignmentTable], plain: bool) {
    if plain {
        print!("{}", render_aliases_plain(tables));
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("From"),
        header_cell("To"),
    ]);
    apply_table_style(&mut table);
    for alignment in tables {
        for (from, to) in alignment.entries() {
            table.add_row(vec![
                Cell::new(alignment.name()).fg(Color::DarkGrey),
                Cell::new(from),
                Cell::new(to),
            ]);
        }
    }
    println!("{table}");
}

fn render_aliases_plain(tables: &[AlignmentTable]) -> String {
    let mut out = String::new();
    for alignment in tables {
        for (from, to) in alignment.entries() {
            out.push_str(alignment.name());
            out.push('\t');
            out.push_str(from);
            out.push('\t');
            out.push_str(to);
            out.push('\n');
        }
    }
    out
}

fn output_cell(stage: &StageSummary) -> Cell {
    let path = stage.path.display().to_string();
    if stage.written {
        Cell::new(path).fg(Color::Green)
    } else {
        Cell::new(format!("{path} (not written)")).fg(Color::DarkGrey)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
