use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cacao_model::{PassReport, schema};
use cacao_transform::{MissingnessAnalysis, QualitySummary};

use crate::types::{AnalyzeResult, CheckResult, CleanResult, ColumnsResult};

pub fn print_clean_summary(result: &CleanResult) {
    println!("Input: {} ({} rows)", result.input.display(), result.raw_rows);
    if result.snapshots.is_empty() {
        println!("Output: dry run, nothing written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    for (snapshot, path) in &result.snapshots {
        println!("{snapshot}: {}", path.display());
    }
    if let Some(path) = &result.report_json {
        println!("Report: {}", path.display());
    }
    println!("{}", pass_table(&result.report.passes));
    print_notices(&result.report.passes);
    println!("{}", decision_table(&result.report.analysis));
    println!(
        "{}",
        quality_table(&[
            ("interim", &result.report.interim_quality),
            ("clean", &result.report.clean_quality),
        ])
    );
}

pub fn print_analysis(result: &AnalyzeResult) {
    println!("Input: {} ({} rows)", result.input.display(), result.rows);
    println!("{}", decision_table(&result.analysis));
    for column in &result.analysis.skipped {
        println!("note: column '{column}' not found, skipped");
    }
}

pub fn print_check(result: &CheckResult) {
    println!("Input: {}", result.input.display());
    println!("{}", quality_table(&[("input", &result.quality)]));
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Missing")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (column, missing) in &result.quality.missing {
        table.add_row(vec![Cell::new(column), count_cell(*missing, Color::Yellow)]);
    }
    println!("{table}");
}

pub fn print_columns(result: &ColumnsResult) {
    println!("Input: {} ({} rows)", result.input.display(), result.rows);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Role"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for column in &result.columns {
        let role = match column.role {
            Some(role) => Cell::new(role),
            None => dim_cell("unexpected"),
        };
        table.add_row(vec![
            Cell::new(&column.name).fg(Color::Blue),
            Cell::new(column.kind),
            role,
            count_cell(column.missing, Color::Yellow),
        ]);
    }
    for name in &result.absent {
        table.add_row(vec![
            Cell::new(*name).fg(Color::Red),
            dim_cell("-"),
            Cell::new(schema::column_role(name).unwrap_or_default()).fg(Color::DarkGrey),
            Cell::new("absent").fg(Color::Red),
        ]);
    }
    println!("{table}");
}

fn pass_table(passes: &[PassReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pass"),
        header_cell("Columns"),
        header_cell("Changed"),
        header_cell("Now missing"),
    ]);
    apply_summary_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_changed = 0usize;
    let mut total_missing = 0usize;
    for report in passes {
        let changed = report.total_changed();
        let missing = report.total_missing_introduced();
        total_changed += changed;
        total_missing += missing;
        let columns = if report.is_clean() {
            dim_cell("-")
        } else {
            Cell::new(report.affected_columns().join(", "))
        };
        table.add_row(vec![
            Cell::new(report.pass).fg(Color::Blue),
            columns,
            count_cell(changed, Color::Green),
            count_cell(missing, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_changed).add_attribute(Attribute::Bold),
        Cell::new(total_missing).add_attribute(Attribute::Bold),
    ]);
    table
}

fn print_notices(passes: &[PassReport]) {
    for report in passes {
        for notice in &report.notices {
            println!("note ({}): {notice}", report.pass);
        }
    }
}

fn decision_table(analysis: &MissingnessAnalysis) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Missing"),
        header_cell("Share"),
        header_cell("Distinct"),
        header_cell("Mode"),
        header_cell("Strategy"),
        header_cell("Rationale"),
    ]);
    apply_summary_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for decision in &analysis.decisions {
        let report = &decision.report;
        let mode = match &report.mode {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        };
        let strategy = match decision.override_strategy {
            Some(forced) => Cell::new(format!("{forced} (override)")).fg(Color::Magenta),
            None => Cell::new(decision.strategy).fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(decision.column()).fg(Color::Blue),
            Cell::new(report.missing_count),
            Cell::new(format!("{:.1}%", report.proportion_missing * 100.0)),
            Cell::new(report.distinct_count),
            mode,
            strategy,
            Cell::new(decision.rationale),
        ]);
    }
    table
}

fn quality_table(snapshots: &[(&str, &QualitySummary)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Snapshot"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Duplicates"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    for index in 1..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (name, quality) in snapshots {
        table.add_row(vec![
            Cell::new(*name).fg(Color::Blue),
            Cell::new(quality.rows),
            Cell::new(quality.columns),
            count_cell(quality.duplicates, Color::Red),
            count_cell(quality.total_missing(), Color::Yellow),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Zero counts are dimmed; non-zero ones take `color`.
fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
