//! Type-safe enumerations for lab summary concepts.
//!
//! These enums replace the free-form strings found in copied lab reports:
//! summary categories, exam families, blood-gas parameters and the fixed
//! qualitative result vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clinical grouping used to order summary lines.
///
/// The declaration order is the summary order. `Suppressed` marks dictionary
/// entries that exist only to stop shorter synonyms from matching and never
/// produces output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Blood count, liver panel and coagulation.
    General,
    /// Renal function and electrolytes.
    Renal,
    /// Venous and arterial blood gases.
    BloodGas,
    /// Glucose, lipids, thyroid, vitamins, iron.
    Metabolic,
    /// Inflammatory markers and autoantibodies.
    Rheumatologic,
    /// Thrombophilia workup, D-dimer and fibrinogen.
    Thrombophilia,
    /// Infectious serologies (qualitative).
    Serology,
    /// Serum drug levels.
    DrugLevel,
    /// Troponin and natriuretic peptides.
    Cardiac,
    /// Routine urinalysis (type 1).
    Urinalysis,
    /// Cerebrospinal fluid, always rendered in its own section.
    CerebrospinalFluid,
    /// Explicitly suppressed synonyms.
    Suppressed,
}

impl Category {
    /// Categories rendered in the summary, in summary order.
    pub const RENDERED: [Category; 11] = [
        Category::General,
        Category::Renal,
        Category::BloodGas,
        Category::Metabolic,
        Category::Rheumatologic,
        Category::Thrombophilia,
        Category::Serology,
        Category::DrugLevel,
        Category::Cardiac,
        Category::Urinalysis,
        Category::CerebrospinalFluid,
    ];

    /// Returns the label printed in front of the category line.
    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "Gerais",
            Category::Renal => "Renal",
            Category::BloodGas => "Gasometria",
            Category::Metabolic => "Metabólico",
            Category::Rheumatologic => "Reumato/autoimune",
            Category::Thrombophilia => "Trombofilias",
            Category::Serology => "Sorologias",
            Category::DrugLevel => "Níveis séricos",
            Category::Cardiac => "Cardio",
            Category::Urinalysis => "Urina 1",
            Category::CerebrospinalFluid => "LCR",
            Category::Suppressed => "Suprimido",
        }
    }

    /// Returns the stable code used in JSON output and CLI listings.
    pub fn as_code(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Renal => "renal",
            Category::BloodGas => "blood-gas",
            Category::Metabolic => "metabolic",
            Category::Rheumatologic => "rheumatologic",
            Category::Thrombophilia => "thrombophilia",
            Category::Serology => "serology",
            Category::DrugLevel => "drug-level",
            Category::Cardiac => "cardiac",
            Category::Urinalysis => "urinalysis",
            Category::CerebrospinalFluid => "csf",
            Category::Suppressed => "suppressed",
        }
    }

    /// Prefix added to table labels so exams sharing an abbreviation across
    /// categories stay distinguishable (`Glic` vs `LCR.Glic`).
    pub fn table_prefix(&self) -> Option<&'static str> {
        match self {
            Category::CerebrospinalFluid => Some("LCR."),
            Category::Urinalysis => Some("U."),
            _ => None,
        }
    }

    /// Returns true if entries of this category carry qualitative results.
    pub fn is_qualitative(&self) -> bool {
        matches!(self, Category::Serology)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parse a category code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Category::RENDERED
            .into_iter()
            .chain([Category::Suppressed])
            .find(|category| category.as_code() == normalized)
            .ok_or_else(|| format!("Unknown category: {s}"))
    }
}

/// Exam family detected for a block; selects the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamFamily {
    BloodGasVenous,
    BloodGasArterial,
    CompleteBloodCount,
    CerebrospinalFluid,
    Urinalysis,
    Generic,
}

impl ExamFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamFamily::BloodGasVenous => "blood-gas-venous",
            ExamFamily::BloodGasArterial => "blood-gas-arterial",
            ExamFamily::CompleteBloodCount => "complete-blood-count",
            ExamFamily::CerebrospinalFluid => "cerebrospinal-fluid",
            ExamFamily::Urinalysis => "urinalysis",
            ExamFamily::Generic => "generic",
        }
    }

    /// Returns the gas type for blood-gas families.
    pub fn gas_kind(&self) -> Option<GasKind> {
        match self {
            ExamFamily::BloodGasVenous => Some(GasKind::Venous),
            ExamFamily::BloodGasArterial => Some(GasKind::Arterial),
            _ => None,
        }
    }
}

impl fmt::Display for ExamFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Blood-gas sample type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GasKind {
    Venous,
    Arterial,
}

impl GasKind {
    /// Abbreviation prefix (`GV` / `GA`).
    pub fn prefix(&self) -> &'static str {
        match self {
            GasKind::Venous => "GV",
            GasKind::Arterial => "GA",
        }
    }
}

/// Fixed blood-gas parameter set, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GasParam {
    Ph,
    Po2,
    Pco2,
    Bicarbonate,
    Lactate,
    O2Saturation,
}

impl GasParam {
    pub const ALL: [GasParam; 6] = [
        GasParam::Ph,
        GasParam::Po2,
        GasParam::Pco2,
        GasParam::Bicarbonate,
        GasParam::Lactate,
        GasParam::O2Saturation,
    ];

    /// Short code used after the `GV.`/`GA.` prefix.
    pub fn code(&self) -> &'static str {
        match self {
            GasParam::Ph => "pH",
            GasParam::Po2 => "pO2",
            GasParam::Pco2 => "pCO2",
            GasParam::Bicarbonate => "BIC",
            GasParam::Lactate => "LAC",
            GasParam::O2Saturation => "SO2",
        }
    }

    /// Full abbreviation for a gas type, e.g. `GA.pCO2`.
    pub fn abbreviation(&self, kind: GasKind) -> String {
        format!("{}.{}", kind.prefix(), self.code())
    }
}

/// Fixed qualitative result vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualitative {
    Reactive,
    NonReactive,
    Indeterminate,
    Positive,
    Negative,
    PartialNegative,
    Detected,
    NotDetected,
    Present,
    Absent,
}

impl Qualitative {
    /// Token stored as the record value.
    pub fn token(&self) -> &'static str {
        match self {
            Qualitative::Reactive => "R",
            Qualitative::NonReactive => "NR",
            Qualitative::Indeterminate => "IND",
            Qualitative::Positive => "Pos",
            Qualitative::Negative => "Neg",
            Qualitative::PartialNegative => "Neg parcial",
            Qualitative::Detected => "Detectado",
            Qualitative::NotDetected => "ND",
            Qualitative::Present => "Presente",
            Qualitative::Absent => "Ausente",
        }
    }
}

impl fmt::Display for Qualitative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Pathogens of the fixed ten-target CSF viral panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pathogen {
    Hsv1,
    Hsv2,
    Vzv,
    Cmv,
    Ebv,
    Hhv6,
    Enterovirus,
    Parechovirus,
    Jcv,
    Adenovirus,
}

impl Pathogen {
    pub const PANEL: [Pathogen; 10] = [
        Pathogen::Hsv1,
        Pathogen::Hsv2,
        Pathogen::Vzv,
        Pathogen::Cmv,
        Pathogen::Ebv,
        Pathogen::Hhv6,
        Pathogen::Enterovirus,
        Pathogen::Parechovirus,
        Pathogen::Jcv,
        Pathogen::Adenovirus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Pathogen::Hsv1 => "HSV-1",
            Pathogen::Hsv2 => "HSV-2",
            Pathogen::Vzv => "VZV",
            Pathogen::Cmv => "CMV",
            Pathogen::Ebv => "EBV",
            Pathogen::Hhv6 => "HHV-6",
            Pathogen::Enterovirus => "Enterovírus",
            Pathogen::Parechovirus => "Parechovírus",
            Pathogen::Jcv => "JCV",
            Pathogen::Adenovirus => "Adenovírus",
        }
    }
}

impl fmt::Display for Pathogen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_round_trip() {
        for category in Category::RENDERED {
            assert_eq!(category.as_code().parse::<Category>(), Ok(category));
        }
        assert!("nope".parse::<Category>().is_err());
    }

    #[test]
    fn rendered_categories_follow_declaration_order() {
        let mut sorted = Category::RENDERED;
        sorted.sort();
        assert_eq!(sorted, Category::RENDERED);
        assert_eq!(Category::RENDERED.last(), Some(&Category::CerebrospinalFluid));
    }

    #[test]
    fn gas_abbreviations() {
        assert_eq!(GasParam::Pco2.abbreviation(GasKind::Arterial), "GA.pCO2");
        assert_eq!(GasParam::Bicarbonate.abbreviation(GasKind::Venous), "GV.BIC");
        assert_eq!(ExamFamily::BloodGasVenous.gas_kind(), Some(GasKind::Venous));
        assert_eq!(ExamFamily::Generic.gas_kind(), None);
    }
}
