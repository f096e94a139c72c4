//! Cerebrospinal fluid panels.
//!
//! Numeric fields are read anywhere in the block. Qualitative fields and the
//! viral panel are line oriented: the outcome sits after the label on the same
//! line, or alone on the next non-empty line.

use std::sync::LazyLock;

use labsum_model::{Category, ExamFamily, Pathogen, Qualitative, ResultRecord, ViralFinding};
use regex::Regex;

use super::qualitative::{culture, detection, negative_positive, presence, serology};
use super::{Extraction, Extractor, find_value};
use crate::segment::ExamBlock;

static NUMERIC_FIELDS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("Cel", r"C[ÉE]LULAS|CELULARIDADE|LEUC[ÓO]CITOS"),
        ("Hem", r"HEM[ÁA]CIAS|ERITR[ÓO]CITOS"),
        ("Prot", r"PROTE[ÍI]NAS?(?: TOTA(?:L|IS))?|PROTEINORRAQUIA"),
        ("Glic", r"GLICOSE|GLICORRAQUIA"),
        ("Lac", r"LACTATO"),
        ("ADA", r"ADENOSINA DEAMINASE|ADA"),
    ]
    .into_iter()
    .map(|(abbreviation, label)| {
        let regex = Regex::new(&format!(
            r"(?i)\b(?:{label})\b[ \t]*(?:\([^)\n]*\))?[ \t]*:?\s*(?<lt><\s*)?(?<value>\d[\d,.]*)"
        ))
        .expect("Invalid CSF numeric regex");
        (abbreviation, regex)
    })
    .collect()
});

static ASPECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*Aspecto[ \t]*:?[ \t]*(?<value>[^\n]*\S)[ \t]*$")
        .expect("Invalid CSF aspect regex")
});

/// Appearance of a normal sample; not worth reporting.
const NORMAL_ASPECT: &[&str] = &["límpido e incolor", "limpido e incolor"];

#[derive(Debug, Clone, Copy)]
enum Reading {
    Culture,
    Detection,
    NegativePositive,
    Presence,
    Serology,
    FreeText,
}

impl Reading {
    fn read(self, text: &str) -> Option<String> {
        let text = text.trim().trim_start_matches([':', '-']).trim();
        if text.is_empty() {
            return None;
        }
        let qualitative = match self {
            Reading::Culture => culture(text),
            Reading::Detection => detection(text),
            Reading::NegativePositive => negative_positive(text),
            Reading::Presence => presence(text),
            Reading::Serology => serology(text),
            Reading::FreeText => return Some(text.trim_end_matches('.').to_string()),
        };
        qualitative.map(|value| value.token().to_string())
    }
}

struct QualitativeField {
    abbreviation: &'static str,
    label: Regex,
    reading: Reading,
}

/// Culture for mycobacteria precedes plain culture so it claims its line first.
static QUALITATIVE_FIELDS: LazyLock<Vec<QualitativeField>> = LazyLock::new(|| {
    [
        (
            "CultMico",
            r"CULTURA (?:PARA )?(?:MICOBACT[ÉE]RIAS|BK)",
            Reading::Culture,
        ),
        ("Cultura", r"CULTURA", Reading::Culture),
        ("Gram", r"BACTERIOSCOPIA|GRAM", Reading::Culture),
        ("BAAR", r"PESQUISA DE BAAR|BAAR|ZIEHL", Reading::Culture),
        (
            "RT-TB",
            r"GENE ?XPERT|RT-PCR (?:PARA )?TUBERCULOSE|PCR (?:PARA )?M\.? ?TUBERCULOSIS",
            Reading::Detection,
        ),
        (
            "Onco",
            r"CITOLOGIA ONC[ÓO]TICA|PESQUISA DE C[ÉE]LULAS NEOPL[ÁA]SICAS",
            Reading::NegativePositive,
        ),
        ("BOC", r"BANDAS OLIGOCLONAIS", Reading::Presence),
        ("VDRL", r"VDRL", Reading::Serology),
        (
            "Crypto",
            r"CRYPTOCOCCUS|CRIPTOCOCO|ANT[ÍI]GENO CRIPTOC[ÓO]CICO|TINTA DA CHINA",
            Reading::Serology,
        ),
        ("EFP", r"ELETROFORESE(?: DE PROTE[ÍI]NAS)?", Reading::FreeText),
    ]
    .into_iter()
    .map(|(abbreviation, label, reading)| QualitativeField {
        abbreviation,
        label: Regex::new(&format!(r"(?i)\b(?:{label})\b")).expect("Invalid CSF field regex"),
        reading,
    })
    .collect()
});

static PATHOGEN_PATTERNS: LazyLock<Vec<(Pathogen, Regex)>> = LazyLock::new(|| {
    [
        (
            Pathogen::Hsv1,
            r"HSV-? ?1|HERPES SIMPLE[SX] (?:V[ÍI]RUS )?(?:TIPO |TYPE )?1",
        ),
        (
            Pathogen::Hsv2,
            r"HSV-? ?2|HERPES SIMPLE[SX] (?:V[ÍI]RUS )?(?:TIPO |TYPE )?2",
        ),
        (Pathogen::Vzv, r"VZV|VARICEL+A[- ]ZOSTER"),
        (Pathogen::Cmv, r"CMV|CITOMEGALOV[ÍI]RUS|CYTOMEGALOVIRUS"),
        (Pathogen::Ebv, r"EBV|EPSTEIN[- ]BARR"),
        (
            Pathogen::Hhv6,
            r"HHV-? ?6|HERPESV[ÍI]RUS (?:HUMANO )?(?:TIPO )?6",
        ),
        (Pathogen::Enterovirus, r"ENTEROV[ÍI]RUS"),
        (Pathogen::Parechovirus, r"PARECHOV[ÍI]RUS"),
        (Pathogen::Jcv, r"JCV|V[ÍI]RUS JC|POLIOMAV[ÍI]RUS JC"),
        (Pathogen::Adenovirus, r"ADENOV[ÍI]RUS"),
    ]
    .into_iter()
    .map(|(pathogen, label)| {
        let regex =
            Regex::new(&format!(r"(?i)\b(?:{label})\b")).expect("Invalid pathogen regex");
        (pathogen, regex)
    })
    .collect()
});

const NOT_TESTED_MARKERS: &[&str] = &["SUSPENSO", "CANCELADO"];

/// Reads CSF chemistry and cell counts, appearance, microbiology and the
/// viral PCR panel. Records go to the CSF category.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsfExtractor;

impl Extractor for CsfExtractor {
    fn family(&self) -> ExamFamily {
        ExamFamily::CerebrospinalFluid
    }

    fn extract(&self, block: &ExamBlock<'_>) -> Extraction {
        let mut extraction = Extraction::new();
        let mut emit = |abbreviation: &str, value: String| {
            extraction.push(ResultRecord::new(
                Category::CerebrospinalFluid,
                abbreviation,
                value,
                block.collected_at,
            ));
        };

        for (abbreviation, regex) in NUMERIC_FIELDS.iter() {
            if let Some(value) = find_value(regex, block.text) {
                emit(*abbreviation, value);
            }
        }
        if let Some(aspect) = read_aspect(block.text) {
            emit("Aspecto", aspect);
        }

        let lines: Vec<&str> = block.text.lines().collect();
        for (abbreviation, value) in read_qualitative_fields(&lines) {
            emit(abbreviation, value);
        }
        extraction.viral = read_viral_panel(&lines);
        extraction
    }
}

fn read_aspect(text: &str) -> Option<String> {
    let captures = ASPECT_REGEX.captures(text)?;
    let value = captures.name("value")?.as_str().trim().trim_end_matches('.');
    let lowered = value.to_lowercase();
    if value.is_empty() || NORMAL_ASPECT.contains(&lowered.as_str()) {
        return None;
    }
    Some(value.to_string())
}

/// Next non-empty line after `index`.
fn next_line<'a>(lines: &[&'a str], index: usize) -> Option<&'a str> {
    lines
        .iter()
        .skip(index + 1)
        .find(|line| !line.trim().is_empty())
        .copied()
}

fn read_qualitative_fields(lines: &[&str]) -> Vec<(&'static str, String)> {
    let mut claimed = vec![false; lines.len()];
    let mut found = Vec::new();
    for field in QUALITATIVE_FIELDS.iter() {
        for (index, line) in lines.iter().enumerate() {
            if claimed[index] {
                continue;
            }
            let Some(label) = field.label.find(line) else {
                continue;
            };
            claimed[index] = true;
            let value = field.reading.read(&line[label.end()..]).or_else(|| {
                next_line(lines, index)
                    .filter(|next| !is_labelled(next))
                    .and_then(|next| field.reading.read(next))
            });
            if let Some(value) = value {
                found.push((field.abbreviation, value));
                break;
            }
        }
    }
    found
}

/// True when a line names a field or pathogen of its own.
fn is_labelled(line: &str) -> bool {
    QUALITATIVE_FIELDS
        .iter()
        .any(|field| field.label.is_match(line))
        || PATHOGEN_PATTERNS
            .iter()
            .any(|(_, regex)| regex.is_match(line))
}

fn read_viral_panel(lines: &[&str]) -> Vec<ViralFinding> {
    let mut findings: Vec<ViralFinding> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let mut rest_start = 0;
        let mut pathogens = Vec::new();
        for (pathogen, regex) in PATHOGEN_PATTERNS.iter() {
            if let Some(found) = regex.find(line) {
                pathogens.push(*pathogen);
                rest_start = rest_start.max(found.end());
            }
        }
        if pathogens.is_empty() {
            continue;
        }

        let same_line = &line[rest_start..];
        let outcome_line = if detection(same_line).is_some() || not_tested(same_line) {
            Some(same_line)
        } else {
            next_line(lines, index).filter(|next| !is_labelled(next))
        };
        let Some(outcome_line) = outcome_line else {
            continue;
        };
        if not_tested(outcome_line) || not_tested(line) {
            continue;
        }
        let Some(outcome) = detection(outcome_line) else {
            continue;
        };
        let detected = outcome == Qualitative::Detected;
        for pathogen in pathogens {
            if !findings.iter().any(|finding| finding.pathogen == pathogen) {
                findings.push(ViralFinding { pathogen, detected });
            }
        }
    }
    findings
}

fn not_tested(text: &str) -> bool {
    let upper = text.to_uppercase();
    NOT_TESTED_MARKERS.iter().any(|marker| upper.contains(marker))
}
