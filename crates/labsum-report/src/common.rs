//! Shared text layout for the summary renderers.

use chrono::NaiveDate;
use labsum_model::{Category, ExamKey, Pathogen, ViralPanelStatus};
use labsum_standards::clinical_rank;

/// Heading of the main summary section.
pub const LAB_HEADING: &str = "> LABORATORIAIS";

/// Heading of the cerebrospinal fluid section.
pub const CSF_HEADING: &str = "> LCR";

/// Separator between items of one line.
pub const ITEM_SEPARATOR: &str = " | ";

/// Categories listed under [`LAB_HEADING`], in summary order.
pub fn lab_categories() -> impl Iterator<Item = Category> {
    Category::RENDERED
        .into_iter()
        .filter(|category| *category != Category::CerebrospinalFluid)
}

/// `- Label: a | b`
pub fn category_line(category: Category, items: &[String]) -> String {
    format!("- {}: {}", category.label(), items.join(ITEM_SEPARATOR))
}

pub fn item(abbreviation: &str, value: &str) -> String {
    format!("{abbreviation} {value}")
}

/// `dd/mm/yyyy`, used by the grouped view.
pub fn full_date(day: NaiveDate) -> String {
    day.format("%d/%m/%Y").to_string()
}

/// `dd/mm`, used for table column labels.
pub fn short_date(day: NaiveDate) -> String {
    day.format("%d/%m").to_string()
}

/// Sort key placing an exam by its clinical position, extras after the
/// ordered ones by abbreviation.
pub fn clinical_sort_key(key: &ExamKey) -> (usize, String) {
    match clinical_rank(key.category, &key.abbreviation) {
        Some(rank) => (rank, String::new()),
        None => (usize::MAX, key.abbreviation.clone()),
    }
}

fn pathogen_list(pathogens: &[Pathogen]) -> String {
    let names: Vec<&str> = pathogens.iter().map(|pathogen| pathogen.label()).collect();
    names.join(", ")
}

/// Text of the viral panel status.
pub fn viral_panel_text(status: &ViralPanelStatus) -> String {
    match status {
        ViralPanelStatus::Negative => "Painel viral negativo".to_string(),
        ViralPanelStatus::Detected {
            positives,
            negatives,
            complete,
        } => {
            let mut text = format!("Painel viral: {} detectado", pathogen_list(positives));
            if !complete {
                text.push_str(", pendente");
                if !negatives.is_empty() {
                    text.push_str(&format!(", parcial: {} neg", pathogen_list(negatives)));
                }
            }
            text
        }
        ViralPanelStatus::Pending { tested } => {
            format!("Painel viral pendente, parcial: {} neg", pathogen_list(tested))
        }
    }
}
