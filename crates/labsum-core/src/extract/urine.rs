//! Urinalysis (urina tipo 1 / EAS).

use std::sync::LazyLock;

use labsum_model::{Category, ExamFamily, ResultRecord};
use regex::Regex;

use super::qualitative::binary;
use super::{Extraction, Extractor, find_value};
use crate::segment::ExamBlock;

static LEADING_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*[:=]?[ \t]*(?<lt><\s*)?(?<value>\d[\d,.]*)")
        .expect("Invalid leading number regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Numeric,
    Binary,
    /// Number when one is reported, otherwise negative/positive wording.
    Either,
}

struct UrineField {
    abbreviation: &'static str,
    label: Regex,
    kind: ValueKind,
}

static FIELDS: LazyLock<Vec<UrineField>> = LazyLock::new(|| {
    [
        ("Leuco", r"LEUC[ÓO]CITOS", ValueKind::Numeric),
        ("Hem", r"HEM[ÁA]CIAS|ERITR[ÓO]CITOS", ValueKind::Numeric),
        ("Prot", r"PROTE[ÍI]NAS?", ValueKind::Either),
        ("Nitrito", r"NITRITOS?", ValueKind::Binary),
        ("EL", r"ESTERASE LEUCOCIT[ÁA]RIA", ValueKind::Binary),
        ("Urob", r"UROBILINOG[ÊE]NIO", ValueKind::Either),
        ("pH", r"PH", ValueKind::Numeric),
        ("Dens", r"DENSIDADE", ValueKind::Numeric),
        ("Glic", r"GLICOSE", ValueKind::Either),
        ("Sangue", r"SANGUE|HEMOGLOBINA", ValueKind::Binary),
        ("CC", r"CORPOS CET[ÔO]NICOS|CETONAS", ValueKind::Binary),
    ]
    .into_iter()
    .map(|(abbreviation, label, kind)| UrineField {
        abbreviation,
        label: Regex::new(&format!(r"(?i)\b(?:{label})\b")).expect("Invalid urinalysis regex"),
        kind,
    })
    .collect()
});

/// Reads dipstick and sediment fields, one per line, in the urinalysis
/// category.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrinalysisExtractor;

impl Extractor for UrinalysisExtractor {
    fn family(&self) -> ExamFamily {
        ExamFamily::Urinalysis
    }

    fn extract(&self, block: &ExamBlock<'_>) -> Extraction {
        let mut extraction = Extraction::new();
        for field in FIELDS.iter() {
            let value = block.text.lines().find_map(|line| {
                let label = field.label.find(line)?;
                read_value(field.kind, &line[label.end()..])
            });
            if let Some(value) = value {
                extraction.push(ResultRecord::new(
                    Category::Urinalysis,
                    field.abbreviation,
                    value,
                    block.collected_at,
                ));
            }
        }
        extraction
    }
}

fn read_value(kind: ValueKind, rest: &str) -> Option<String> {
    let number = || find_value(&LEADING_NUMBER_REGEX, rest);
    let wording = || binary(rest).map(|value| value.token().to_string());
    match kind {
        ValueKind::Numeric => number(),
        ValueKind::Binary => wording(),
        ValueKind::Either => number().or_else(wording),
    }
}
