//! Tests for agreement between the grouped and tabular views.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use labsum_model::{Category, DateOrder, LabResults, ResultRecord};
use labsum_report::{build_table, render_by_date};
use proptest::prelude::*;

const EXAMS: &[(Category, &str)] = &[
    (Category::Renal, "Na"),
    (Category::Renal, "K"),
    (Category::General, "Hb"),
    (Category::Metabolic, "Glic"),
    (Category::CerebrospinalFluid, "Glic"),
];

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Reads `(day, label, value)` back from the grouped text. Labels follow the
/// table convention so CSF rows carry their `LCR.` prefix.
fn grouped_triples(text: &str) -> BTreeSet<(NaiveDate, String, String)> {
    let mut triples = BTreeSet::new();
    let mut prefix = "";
    for line in text.lines() {
        if let Some(label) = line.strip_prefix("- ") {
            prefix = if label == "LCR:" { "LCR." } else { "" };
            continue;
        }
        let Some(rest) = line.strip_prefix("  ") else {
            continue;
        };
        let Some((date, items)) = rest.split_once(": ") else {
            continue;
        };
        let Ok(day) = NaiveDate::parse_from_str(date, "%d/%m/%Y") else {
            continue;
        };
        for item in items.split(" | ") {
            let (abbreviation, value) = item.split_once(' ').unwrap();
            triples.insert((day, format!("{prefix}{abbreviation}"), value.to_string()));
        }
    }
    triples
}

fn record_strategy() -> impl Strategy<Value = ResultRecord> {
    (0..EXAMS.len(), 1u32..4, 0u32..3, 1u32..200).prop_map(|(exam, day, hour, value)| {
        let (category, abbreviation) = EXAMS[exam];
        ResultRecord::new(category, abbreviation, value.to_string(), at(day, hour * 6))
    })
}

proptest! {
    #[test]
    fn table_and_grouped_views_agree(records in prop::collection::vec(record_strategy(), 0..40)) {
        let mut results = LabResults::new();
        for record in records {
            results.store.commit(record);
        }
        let table: BTreeSet<_> = build_table(&results, DateOrder::Ascending)
            .triples()
            .into_iter()
            .collect();
        let grouped = grouped_triples(&render_by_date(&results, false));
        prop_assert_eq!(table, grouped);
    }

    #[test]
    fn column_order_does_not_change_cells(records in prop::collection::vec(record_strategy(), 0..40)) {
        let mut results = LabResults::new();
        for record in records {
            results.store.commit(record);
        }
        let ascending: BTreeSet<_> = build_table(&results, DateOrder::Ascending)
            .triples()
            .into_iter()
            .collect();
        let descending: BTreeSet<_> = build_table(&results, DateOrder::Descending)
            .triples()
            .into_iter()
            .collect();
        prop_assert_eq!(ascending, descending);
    }
}

#[test]
fn older_reading_is_kept_per_day() {
    let mut results = LabResults::new();
    results
        .store
        .commit(ResultRecord::new(Category::Renal, "Na", "150", at(2, 6)));
    results
        .store
        .commit(ResultRecord::new(Category::Renal, "Na", "140", at(1, 6)));

    let flat = labsum_report::render_summary(&results);
    assert!(flat.contains("Na 150"));
    assert!(!flat.contains("Na 140"));

    let grouped = render_by_date(&results, false);
    assert!(grouped.contains("01/05/2025: Na 140"));
    assert!(grouped.contains("02/05/2025: Na 150"));
}
