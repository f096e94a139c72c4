//! Date-pivoted table: exams as rows, calendar days as columns.

use chrono::NaiveDate;
use labsum_model::{Category, DateOrder, ExamKey, LabResults};
use labsum_standards::clinical_rank;
use serde::Serialize;

use crate::common::short_date;
use crate::daily::DailyView;

/// Label of the group holding exams outside every clinical order.
pub const OTHER_GROUP_LABEL: &str = "Outros";

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub key: ExamKey,
    /// Row label (`Na`, `GA.pH`, `LCR.Glic`).
    pub label: String,
    /// Category header the row sits under; `None` for the trailing group.
    pub group: Option<Category>,
}

/// Pivot of the history: `values[d][r]` is the cell for day `d`, row `r`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableData {
    pub days: Vec<NaiveDate>,
    pub rows: Vec<TableRow>,
    pub values: Vec<Vec<Option<String>>>,
}

impl TableData {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty() || self.rows.is_empty()
    }

    pub fn cell(&self, day: usize, row: usize) -> Option<&str> {
        self.values.get(day)?.get(row)?.as_deref()
    }

    /// Column labels (`dd/mm`).
    pub fn day_labels(&self) -> Vec<String> {
        self.days.iter().copied().map(short_date).collect()
    }

    /// Rows split into consecutive groups sharing a category header.
    pub fn row_groups(&self) -> Vec<(Option<Category>, std::ops::Range<usize>)> {
        let mut groups: Vec<(Option<Category>, std::ops::Range<usize>)> = Vec::new();
        for (index, row) in self.rows.iter().enumerate() {
            match groups.last_mut() {
                Some((group, range)) if *group == row.group => range.end = index + 1,
                _ => groups.push((row.group, index..index + 1)),
            }
        }
        groups
    }

    /// `(day, label, value)` for every filled cell.
    pub fn triples(&self) -> Vec<(NaiveDate, String, String)> {
        let mut triples = Vec::new();
        for (day_index, day) in self.days.iter().enumerate() {
            for (row_index, row) in self.rows.iter().enumerate() {
                if let Some(value) = self.cell(day_index, row_index) {
                    triples.push((*day, row.label.clone(), value.to_string()));
                }
            }
        }
        triples
    }

    /// Tab-separated export with a header row, one line per exam.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        let mut header = vec!["Exame".to_string()];
        header.extend(self.day_labels());
        out.push_str(&header.join("\t"));
        out.push('\n');
        for (row_index, row) in self.rows.iter().enumerate() {
            let mut line = vec![row.label.clone()];
            for day_index in 0..self.days.len() {
                line.push(self.cell(day_index, row_index).unwrap_or_default().to_string());
            }
            out.push_str(&line.join("\t"));
            out.push('\n');
        }
        out
    }
}

/// Builds the table from the full history, gas readings included.
pub fn build_table(results: &LabResults, order: DateOrder) -> TableData {
    let view = DailyView::build(results.store.history(), false);

    let mut days: Vec<NaiveDate> = view.days().collect();
    if order == DateOrder::Descending {
        days.reverse();
    }

    let mut keys: Vec<ExamKey> = view.keys().into_iter().collect();
    keys.sort_by_cached_key(row_sort_key);

    let values: Vec<Vec<Option<String>>> = days
        .iter()
        .map(|day| {
            let entries = view.day(*day);
            keys.iter()
                .map(|key| {
                    entries
                        .and_then(|entries| entries.get(key))
                        .map(|record| record.value.clone())
                })
                .collect()
        })
        .collect();

    let rows = keys
        .into_iter()
        .map(|key| TableRow {
            label: key.label(),
            group: clinical_rank(key.category, &key.abbreviation).map(|_| key.category),
            key,
        })
        .collect();

    TableData { days, rows, values }
}

/// Ordered exams by category rank and clinical position; all remaining
/// exams after them, by label.
fn row_sort_key(key: &ExamKey) -> (bool, Category, usize, String) {
    match clinical_rank(key.category, &key.abbreviation) {
        Some(rank) => (false, key.category, rank, String::new()),
        None => (true, Category::General, 0, key.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use labsum_model::ResultRecord;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn results() -> LabResults {
        let mut results = LabResults::new();
        for record in [
            ResultRecord::new(Category::Renal, "Na", "138", at(1, 6)),
            ResultRecord::new(Category::General, "Hb", "12.1", at(1, 6)),
            ResultRecord::new(Category::Renal, "Zz", "5", at(2, 6)),
            ResultRecord::new(Category::Renal, "Na", "141", at(2, 6)),
            ResultRecord::new(Category::Renal, "Na", "143", at(2, 9)),
            ResultRecord::new(Category::CerebrospinalFluid, "Glic", "55", at(2, 9)),
        ] {
            results.store.commit(record);
        }
        results
    }

    #[test]
    fn rows_follow_category_and_clinical_order() {
        let table = build_table(&results(), DateOrder::Ascending);
        let labels: Vec<&str> = table.rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["Hb", "Na", "LCR.Glic", "Zz"]);
        assert_eq!(table.rows[3].group, None);
        assert_eq!(table.row_groups().len(), 4);
    }

    #[test]
    fn cells_hold_latest_value_of_the_day() {
        let table = build_table(&results(), DateOrder::Ascending);
        assert_eq!(table.cell(0, 1), Some("138"));
        assert_eq!(table.cell(1, 1), Some("143"));
        assert_eq!(table.cell(0, 3), None);
    }

    #[test]
    fn descending_reverses_columns() {
        let ascending = build_table(&results(), DateOrder::Ascending);
        let descending = build_table(&results(), DateOrder::Descending);
        assert_eq!(descending.day_labels(), vec!["02/03", "01/03"]);
        assert_eq!(descending.cell(0, 1), ascending.cell(1, 1));
    }

    #[test]
    fn tsv_export() {
        let table = build_table(&results(), DateOrder::Ascending);
        assert_eq!(
            table.to_tsv(),
            "Exame\t01/03\t02/03\nHb\t12.1\t\nNa\t138\t143\nLCR.Glic\t\t55\nZz\t\t5\n"
        );
    }

    #[test]
    fn serializes_to_json() {
        let table = build_table(&results(), DateOrder::Ascending);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["days"][0], "2025-03-01");
        assert_eq!(json["rows"][2]["label"], "LCR.Glic");
        assert_eq!(json["values"][1][1], "143");
    }
}
