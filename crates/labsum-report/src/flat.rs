//! Flat summary: the latest value of every exam, one line per category.

use labsum_model::{Category, GasKind, GasParam, LabResults, ResultRecord};
use labsum_standards::{FLAT_VENOUS_PARAMS, clinical_order, clinical_rank};

use crate::common::{
    CSF_HEADING, ITEM_SEPARATOR, LAB_HEADING, category_line, item, lab_categories,
    viral_panel_text,
};

/// Renders the flat summary.
pub fn render_summary(results: &LabResults) -> String {
    let mut lines = vec![LAB_HEADING.to_string()];

    for category in lab_categories() {
        let items = match category {
            Category::BloodGas => gas_items(results),
            _ => category_items(results, category),
        };
        if !items.is_empty() {
            lines.push(category_line(category, &items));
        }
    }

    let mut csf_items = category_items(results, Category::CerebrospinalFluid);
    if let Some(status) = results.viral.status() {
        csf_items.push(viral_panel_text(&status));
    }
    if !csf_items.is_empty() {
        lines.push(String::new());
        lines.push(CSF_HEADING.to_string());
        lines.push(format!("- LCR: {}", csf_items.join(ITEM_SEPARATOR)));
    }

    lines.join("\n")
}

/// Latest values of a category: clinical order first, then extras in
/// first-seen order.
fn category_items(results: &LabResults, category: Category) -> Vec<String> {
    let store = &results.store;
    let ordered = clinical_order(category)
        .iter()
        .filter_map(|abbreviation| store.get(category, abbreviation));
    let extras = store
        .latest_in(category)
        .filter(|record| clinical_rank(category, &record.abbreviation).is_none());

    ordered
        .chain(extras)
        .map(|record| format_record(results, record))
        .collect()
}

fn format_record(results: &LabResults, record: &ResultRecord) -> String {
    let mut text = item(&record.abbreviation, &record.value);
    if record.category == Category::General && record.abbreviation == "Leuco" {
        let cells: Vec<String> = results
            .differential
            .iter()
            .flat_map(|differential| differential.cells())
            .map(|(label, value)| item(label, value))
            .collect();
        if !cells.is_empty() {
            text.push_str(&format!(" ({})", cells.join(" / ")));
        }
    }
    text
}

/// Gas line from the latest snapshot of each type. Venous panels show the
/// reduced parameter set.
fn gas_items(results: &LabResults) -> Vec<String> {
    let mut items = Vec::new();
    for (kind, params) in [
        (GasKind::Venous, &FLAT_VENOUS_PARAMS[..]),
        (GasKind::Arterial, &GasParam::ALL[..]),
    ] {
        let Some(snapshot) = results.gases.latest(kind) else {
            continue;
        };
        for param in params {
            if let Some(value) = snapshot.get(*param) {
                items.push(item(&param.abbreviation(kind), value));
            }
        }
    }
    items
}
