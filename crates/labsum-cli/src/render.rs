//! Terminal tables for the pivot, parse statistics and the exam dictionary.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labsum_core::{ParseStats, TableData, is_abnormal};
use labsum_model::ExamDefinition;
use labsum_report::OTHER_GROUP_LABEL;

/// Date-pivoted table with one header row per category.
///
/// Cells outside the reference range of their exam are red.
pub fn pivot_table(data: &TableData) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Exame")];
    header.extend(data.day_labels().iter().map(|label| header_cell(label)));
    table.set_header(header);
    apply_table_style(&mut table);
    for column in 1..=data.days.len() {
        align_column(&mut table, column, CellAlignment::Right);
    }

    for (group, rows) in data.row_groups() {
        let label = group.map_or(OTHER_GROUP_LABEL, |category| category.label());
        let mut group_row = vec![group_cell(label)];
        group_row.extend((0..data.days.len()).map(|_| Cell::new("")));
        table.add_row(group_row);

        for row in rows {
            let label = &data.rows[row].label;
            let mut cells = vec![Cell::new(format!("  {label}"))];
            cells.extend((0..data.days.len()).map(|day| match data.cell(day, row) {
                Some(value) => value_cell(label, value),
                None => dim_cell("-"),
            }));
            table.add_row(cells);
        }
    }
    table
}

pub fn stats_table(stats: &ParseStats) -> Table {
    let most_recent = stats
        .most_recent
        .map_or_else(|| "-".to_string(), |at| at.format("%d/%m/%Y %H:%M").to_string());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Blocks"), Cell::new(stats.blocks)]);
    table.add_row(vec![Cell::new("Accepted"), Cell::new(stats.accepted())]);
    table.add_row(vec![
        Cell::new("Dropped (invalidated)"),
        count_cell(stats.dropped_invalidated),
    ]);
    table.add_row(vec![
        Cell::new("Dropped (no collection time)"),
        count_cell(stats.dropped_missing_collection_time),
    ]);
    table.add_row(vec![
        Cell::new("Dropped (impossible collection time)"),
        count_cell(stats.dropped_invalid_collection_time),
    ]);
    table.add_row(vec![Cell::new("Empty blocks"), count_cell(stats.empty_blocks)]);
    table.add_row(vec![Cell::new("Records"), Cell::new(stats.records)]);
    table.add_row(vec![Cell::new("Distinct exams"), Cell::new(stats.distinct_exams)]);
    table.add_row(vec![Cell::new("Most recent"), Cell::new(most_recent)]);
    table
}

/// Dictionary entries in match order, longest synonym first.
pub fn dictionary_table<'a>(entries: impl IntoIterator<Item = &'a ExamDefinition>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Synonym"),
        header_cell("Abbreviation"),
        header_cell("Category"),
        header_cell("Unit"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, entry) in entries.into_iter().enumerate() {
        let abbreviation = match entry.abbreviation() {
            Some(abbreviation) => Cell::new(abbreviation)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            None => dim_cell("suppressed"),
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(entry.synonym),
            abbreviation,
            Cell::new(entry.category.as_code()),
            entry.unit.map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn value_cell(label: &str, value: &str) -> Cell {
    if is_abnormal(label, value) {
        Cell::new(value)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(value)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn group_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
