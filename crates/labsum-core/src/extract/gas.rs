//! Blood-gas panels.

use std::sync::LazyLock;

use labsum_model::{Category, ExamFamily, GasKind, GasParam, GasSnapshot, ResultRecord};
use regex::Regex;

use super::{Extraction, Extractor, find_value};
use crate::segment::ExamBlock;

struct ParamPattern {
    param: GasParam,
    regex: Regex,
}

static PARAM_PATTERNS: LazyLock<Vec<ParamPattern>> = LazyLock::new(|| {
    [
        (GasParam::Ph, r"pH"),
        (GasParam::Po2, r"pO2"),
        (GasParam::Pco2, r"pCO2"),
        (GasParam::Bicarbonate, r"(?:ct)?HCO3-?"),
        (GasParam::Lactate, r"LACTATO"),
        (GasParam::O2Saturation, r"SO2"),
    ]
    .into_iter()
    .map(|(param, label)| ParamPattern {
        param,
        regex: Regex::new(&format!(r"(?i)\b{label}\s+(?<value>[\d,.]+)"))
            .expect("Invalid blood gas regex"),
    })
    .collect()
});

/// Reads pH, pO2, pCO2, bicarbonate, lactate and O2 saturation.
///
/// Each value becomes a `GV.<param>` / `GA.<param>` record in the blood-gas
/// category, and the whole reading is returned as one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct GasExtractor {
    kind: GasKind,
}

impl GasExtractor {
    pub const fn new(kind: GasKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> GasKind {
        self.kind
    }
}

impl Extractor for GasExtractor {
    fn family(&self) -> ExamFamily {
        match self.kind {
            GasKind::Venous => ExamFamily::BloodGasVenous,
            GasKind::Arterial => ExamFamily::BloodGasArterial,
        }
    }

    fn extract(&self, block: &ExamBlock<'_>) -> Extraction {
        let mut extraction = Extraction::new();
        let mut snapshot = GasSnapshot::new(self.kind, block.collected_at);
        for pattern in PARAM_PATTERNS.iter() {
            let Some(value) = find_value(&pattern.regex, block.text) else {
                continue;
            };
            extraction.push(ResultRecord::new(
                Category::BloodGas,
                pattern.param.abbreviation(self.kind),
                value.clone(),
                block.collected_at,
            ));
            snapshot.values.insert(pattern.param, value);
        }
        if !snapshot.is_empty() {
            extraction.gas = Some(snapshot);
        }
        extraction
    }
}
