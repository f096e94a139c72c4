//! Family-specific value extraction.
//!
//! Each exam family has one [`Extractor`]. Extractors are pure: they read a
//! single [`ExamBlock`] and return an [`Extraction`] without touching parse
//! state. The pipeline folds extractions into the state afterwards.
//!
//! | Family | Extractor | Side output |
//! |--------|-----------|-------------|
//! | BloodGasVenous / BloodGasArterial | [`GasExtractor`] | gas snapshot |
//! | CompleteBloodCount | [`BloodCountExtractor`] | differential |
//! | CerebrospinalFluid | [`CsfExtractor`] | viral findings |
//! | Urinalysis | [`UrinalysisExtractor`] | none |
//! | Generic | [`GenericExtractor`] | none |

mod cbc;
mod csf;
mod gas;
mod generic;
pub mod qualitative;
mod urine;

pub use cbc::BloodCountExtractor;
pub use csf::CsfExtractor;
pub use gas::GasExtractor;
pub use generic::{GenericExtractor, SynonymMatcher};
pub use urine::UrinalysisExtractor;

use labsum_model::{Differential, ExamFamily, GasKind, GasSnapshot, ResultRecord, ViralFinding};
use regex::{Captures, Regex};

use crate::numeric::normalize_bounded;
use crate::segment::ExamBlock;

/// Everything one block yielded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<ResultRecord>,
    pub gas: Option<GasSnapshot>,
    pub differential: Option<Differential>,
    pub viral: Vec<ViralFinding>,
}

impl Extraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
            && self.gas.as_ref().is_none_or(GasSnapshot::is_empty)
            && self.differential.as_ref().is_none_or(Differential::is_empty)
            && self.viral.is_empty()
    }
}

/// Value extraction for one exam family.
pub trait Extractor: Send + Sync {
    /// Family this extractor handles.
    fn family(&self) -> ExamFamily;

    /// Reads every value it recognizes in `block`.
    fn extract(&self, block: &ExamBlock<'_>) -> Extraction;
}

static VENOUS_GAS: GasExtractor = GasExtractor::new(GasKind::Venous);
static ARTERIAL_GAS: GasExtractor = GasExtractor::new(GasKind::Arterial);
static BLOOD_COUNT: BloodCountExtractor = BloodCountExtractor;
static CSF: CsfExtractor = CsfExtractor;
static URINALYSIS: UrinalysisExtractor = UrinalysisExtractor;

/// The extractor for a family.
pub fn extractor_for(family: ExamFamily) -> &'static dyn Extractor {
    match family {
        ExamFamily::BloodGasVenous => &VENOUS_GAS,
        ExamFamily::BloodGasArterial => &ARTERIAL_GAS,
        ExamFamily::CompleteBloodCount => &BLOOD_COUNT,
        ExamFamily::CerebrospinalFluid => &CSF,
        ExamFamily::Urinalysis => &URINALYSIS,
        ExamFamily::Generic => GenericExtractor::shared(),
    }
}

/// Runs the extractor matching the block's family.
pub fn extract(block: &ExamBlock<'_>) -> Extraction {
    extractor_for(block.family).extract(block)
}

/// Reads a number from named groups `value` and optional `lt` (`<` marker).
pub(crate) fn bounded_value(captures: &Captures<'_>) -> Option<String> {
    let value = captures.name("value")?;
    normalize_bounded(captures.name("lt").is_some(), value.as_str())
}

/// First match of `regex` in `text`, read with [`bounded_value`].
pub(crate) fn find_value(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|captures| bounded_value(&captures))
}
