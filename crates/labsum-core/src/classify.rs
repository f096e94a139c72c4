//! Exam family detection.

use std::sync::LazyLock;

use labsum_model::ExamFamily;
use regex::Regex;

const VENOUS_GAS_MARKERS: &[&str] = &["GASOMETRIA - SANGUE VENOSO", "GASOMETRIA VENOSA"];
const ARTERIAL_GAS_MARKERS: &[&str] = &["GASOMETRIA - SANGUE ARTERIAL", "GASOMETRIA ARTERIAL"];
const BLOOD_COUNT_MARKERS: &[&str] = &["HEMOGRAMA COMPLETO", "HEMOGRAMA"];

static CSF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:LCR|LÍQUOR|LIQUOR|LÍQUIDO CEFALORRAQUIANO|LIQUIDO CEFALORRAQUIANO)\b")
        .expect("Invalid CSF marker regex")
});

static URINALYSIS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:URINA TIPO (?:1|I)|URINA (?:1|I)|EAS)\b")
        .expect("Invalid urinalysis marker regex")
});

/// Detects the family of a block. Priority is fixed and the first match
/// wins; anything unrecognized is `Generic`.
pub fn classify(text: &str) -> ExamFamily {
    let upper = text.to_uppercase();
    let contains_any = |markers: &[&str]| markers.iter().any(|marker| upper.contains(marker));

    if contains_any(VENOUS_GAS_MARKERS) {
        ExamFamily::BloodGasVenous
    } else if contains_any(ARTERIAL_GAS_MARKERS) {
        ExamFamily::BloodGasArterial
    } else if contains_any(BLOOD_COUNT_MARKERS) {
        ExamFamily::CompleteBloodCount
    } else if CSF_REGEX.is_match(text) {
        ExamFamily::CerebrospinalFluid
    } else if URINALYSIS_REGEX.is_match(text) {
        ExamFamily::Urinalysis
    } else {
        ExamFamily::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_panels() {
        assert_eq!(classify("GASOMETRIA - SANGUE VENOSO"), ExamFamily::BloodGasVenous);
        assert_eq!(classify("Gasometria arterial"), ExamFamily::BloodGasArterial);
    }

    #[test]
    fn venous_outranks_blood_count() {
        assert_eq!(
            classify("GASOMETRIA VENOSA\nHEMOGRAMA"),
            ExamFamily::BloodGasVenous
        );
    }

    #[test]
    fn blood_count() {
        assert_eq!(classify("HEMOGRAMA COMPLETO - SANGUE"), ExamFamily::CompleteBloodCount);
        assert_eq!(classify("Hemograma"), ExamFamily::CompleteBloodCount);
    }

    #[test]
    fn csf_needs_whole_word() {
        assert_eq!(classify("PROTEÍNAS - LCR"), ExamFamily::CerebrospinalFluid);
        assert_eq!(classify("Líquor: celularidade"), ExamFamily::CerebrospinalFluid);
        assert_eq!(classify("GLICOSE - LÍQUIDO CEFALORRAQUIANO"), ExamFamily::CerebrospinalFluid);
        assert_eq!(classify("ALCR 12"), ExamFamily::Generic);
    }

    #[test]
    fn urinalysis() {
        assert_eq!(classify("URINA TIPO I"), ExamFamily::Urinalysis);
        assert_eq!(classify("Urina 1 - jato médio"), ExamFamily::Urinalysis);
        assert_eq!(classify("EAS"), ExamFamily::Urinalysis);
        assert_eq!(classify("UREIA 40"), ExamFamily::Generic);
        assert_eq!(classify("CULTURA DE URINA"), ExamFamily::Generic);
    }
}
