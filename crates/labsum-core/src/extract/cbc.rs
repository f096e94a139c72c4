//! Complete blood count.

use std::sync::LazyLock;

use labsum_model::{Category, Differential, ExamFamily, ResultRecord};
use regex::Regex;

use super::{Extraction, Extractor, find_value};
use crate::segment::ExamBlock;

const NUMBER: &str = r"(?<value>[\d,.]+)";

fn pattern(label: &str, unit: &str) -> Regex {
    Regex::new(&format!(r"(?i){label}\s+{NUMBER}\s*{unit}")).expect("Invalid blood count regex")
}

static COUNT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("Hb", pattern("Hemoglobina", "g/dL")),
        ("Ht", pattern("Hemat[óo]crito", "%")),
        ("VCM", pattern("VCM", "fL")),
        ("Leuco", pattern("Leuc[óo]citos", "mil/mm[³3]")),
        ("Plaq", pattern("Plaquetas", "mil/mm[³3]")),
    ]
});

static NEUTROPHILS_REGEX: LazyLock<Regex> = LazyLock::new(|| pattern("Neutr[óo]filos", "%"));
static LYMPHOCYTES_REGEX: LazyLock<Regex> = LazyLock::new(|| pattern("Linf[óo]citos", "%"));
static MONOCYTES_REGEX: LazyLock<Regex> = LazyLock::new(|| pattern("Mon[óo]citos", "%"));
static EOSINOPHILS_REGEX: LazyLock<Regex> = LazyLock::new(|| pattern("Eosin[óo]filos", "%"));

/// Reads Hb, Ht, VCM, leukocytes and platelets in the general category,
/// plus the leukocyte differential percentages.
#[derive(Debug, Clone, Copy, Default)]
pub struct BloodCountExtractor;

impl Extractor for BloodCountExtractor {
    fn family(&self) -> ExamFamily {
        ExamFamily::CompleteBloodCount
    }

    fn extract(&self, block: &ExamBlock<'_>) -> Extraction {
        let mut extraction = Extraction::new();
        for (abbreviation, regex) in COUNT_PATTERNS.iter() {
            if let Some(value) = find_value(regex, block.text) {
                extraction.push(ResultRecord::new(
                    Category::General,
                    *abbreviation,
                    value,
                    block.collected_at,
                ));
            }
        }

        let differential = Differential {
            collected_at: block.collected_at,
            neutrophils: find_value(&NEUTROPHILS_REGEX, block.text),
            lymphocytes: find_value(&LYMPHOCYTES_REGEX, block.text),
            monocytes: find_value(&MONOCYTES_REGEX, block.text),
            eosinophils: find_value(&EOSINOPHILS_REGEX, block.text),
        };
        if !differential.is_empty() {
            extraction.differential = Some(differential);
        }
        extraction
    }
}
