//! Summary grouped by category and calendar day.

use labsum_model::{Category, LabResults};

use crate::common::{
    CSF_HEADING, ITEM_SEPARATOR, LAB_HEADING, clinical_sort_key, full_date, item,
    lab_categories, viral_panel_text,
};
use crate::daily::DailyView;

/// Renders the grouped-by-date summary.
///
/// Every category with values gets a `- Label:` line followed by one
/// `  dd/mm/yyyy: a | b` line per day, oldest first.
pub fn render_by_date(results: &LabResults, only_most_recent: bool) -> String {
    let view = DailyView::build(results.store.history(), only_most_recent);
    let mut lines = vec![LAB_HEADING.to_string()];

    for category in lab_categories() {
        let days = day_lines(&view, category);
        if !days.is_empty() {
            lines.push(format!("- {}:", category.label()));
            lines.extend(days);
        }
    }

    let mut csf = day_lines(&view, Category::CerebrospinalFluid);
    if let Some(status) = results.viral.status() {
        csf.push(format!("  {}", viral_panel_text(&status)));
    }
    if !csf.is_empty() {
        lines.push(String::new());
        lines.push(CSF_HEADING.to_string());
        lines.push(format!("- {}:", Category::CerebrospinalFluid.label()));
        lines.extend(csf);
    }

    lines.join("\n")
}

fn day_lines(view: &DailyView<'_>, category: Category) -> Vec<String> {
    let mut lines = Vec::new();
    for day in view.days() {
        let Some(entries) = view.day(day) else {
            continue;
        };
        let mut records: Vec<_> = entries
            .iter()
            .filter(|(key, _)| key.category == category)
            .collect();
        if records.is_empty() {
            continue;
        }
        records.sort_by_key(|(key, _)| clinical_sort_key(key));
        let items: Vec<String> = records
            .into_iter()
            .map(|(key, record)| item(&key.abbreviation, &record.value))
            .collect();
        lines.push(format!("  {}: {}", full_date(day), items.join(ITEM_SEPARATOR)));
    }
    lines
}
