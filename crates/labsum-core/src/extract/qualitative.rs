//! Normalization of qualitative result phrasing.
//!
//! Negated forms are always checked before their positive counterparts:
//! "NÃO REAGENTE" contains "REAGENTE", "NÃO DETECTADO" contains "DETECTADO".

use std::sync::LazyLock;

use labsum_model::Qualitative;
use regex::Regex;

static SEROLOGY_RESULT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Resultado:\s*(Não Reagente|Nao Reagente|Reagente|Indeterminado)")
        .expect("Invalid serology result regex")
});

static PLUS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\++\s*$").expect("Invalid plus regex"));

const NON_REACTIVE: &[&str] = &["NÃO REAGENTE", "NAO REAGENTE"];
const NOT_DETECTED: &[&str] = &["NÃO DETECTADO", "NAO DETECTADO", "INDETECTÁVEL", "INDETECTAVEL"];

fn contains_any(upper: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| upper.contains(marker))
}

/// Serology outcome of a whole block: `NR`, `R`, `IND`, `Neg` or `Pos`.
pub fn serology(text: &str) -> Option<Qualitative> {
    let upper = text.to_uppercase();
    if contains_any(&upper, NON_REACTIVE) {
        return Some(Qualitative::NonReactive);
    }
    if let Some(captures) = SEROLOGY_RESULT_REGEX.captures(text) {
        let result = captures[1].to_uppercase();
        return Some(match result.as_str() {
            "REAGENTE" => Qualitative::Reactive,
            "INDETERMINADO" => Qualitative::Indeterminate,
            _ => Qualitative::NonReactive,
        });
    }
    if upper.contains("REAGENTE") {
        return Some(Qualitative::Reactive);
    }
    if upper.contains("INDETERMINADO") {
        return Some(Qualitative::Indeterminate);
    }
    negative_positive(&upper)
}

/// `Neg`/`Pos` from explicit negative or positive wording.
pub fn negative_positive(text: &str) -> Option<Qualitative> {
    let upper = text.to_uppercase();
    if contains_any(&upper, &["NEGATIV", "NEGATIVE"]) {
        Some(Qualitative::Negative)
    } else if contains_any(&upper, &["POSITIV", "POSITIVE"]) {
        Some(Qualitative::Positive)
    } else {
        None
    }
}

/// Urinalysis dipstick phrasing. `Neg`: negativo, ausente, normal,
/// não reagente. `Pos`: positivo, presente, reagente or crosses (`++`).
pub fn binary(text: &str) -> Option<Qualitative> {
    let upper = text.to_uppercase();
    if contains_any(&upper, &["NEGATIV", "AUSENTE", "NORMAL"]) || contains_any(&upper, NON_REACTIVE)
    {
        Some(Qualitative::Negative)
    } else if contains_any(&upper, &["POSITIV", "PRESENTE", "REAGENTE"])
        || PLUS_REGEX.is_match(text)
    {
        Some(Qualitative::Positive)
    } else {
        None
    }
}

/// Culture and smear results. A negative result that is still partial
/// becomes `Neg parcial`.
pub fn culture(text: &str) -> Option<Qualitative> {
    let upper = text.to_uppercase();
    let negative = contains_any(
        &upper,
        &[
            "NEGATIV",
            "SEM CRESCIMENTO",
            "NÃO HOUVE CRESCIMENTO",
            "NAO HOUVE CRESCIMENTO",
            "AUSÊNCIA DE",
            "AUSENCIA DE",
            "NÃO FORAM OBSERVAD",
            "NAO FORAM OBSERVAD",
        ],
    );
    if negative {
        let partial = contains_any(&upper, &["PARCIAL", "ATÉ O MOMENTO", "ATE O MOMENTO", "EM ANDAMENTO"]);
        return Some(if partial {
            Qualitative::PartialNegative
        } else {
            Qualitative::Negative
        });
    }
    if contains_any(&upper, &["POSITIV", "CRESCIMENTO DE", "PRESENÇA DE", "PRESENCA DE", "OBSERVAD"]) {
        return Some(Qualitative::Positive);
    }
    None
}

/// Molecular detection: `ND` or `Detectado`.
pub fn detection(text: &str) -> Option<Qualitative> {
    let upper = text.to_uppercase();
    if contains_any(&upper, NOT_DETECTED) {
        Some(Qualitative::NotDetected)
    } else if contains_any(&upper, &["DETECTADO", "DETECTÁVEL", "DETECTAVEL"]) {
        Some(Qualitative::Detected)
    } else {
        None
    }
}

/// `Presente` or `Ausente`.
pub fn presence(text: &str) -> Option<Qualitative> {
    let upper = text.to_uppercase();
    if contains_any(&upper, &["AUSÊNCIA", "AUSENCIA", "AUSENTE", "NÃO HÁ", "NAO HA"]) {
        Some(Qualitative::Absent)
    } else if contains_any(&upper, &["PRESENÇA", "PRESENCA", "PRESENTE"]) {
        Some(Qualitative::Present)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_reactive_before_reactive() {
        assert_eq!(serology("Resultado: Não Reagente"), Some(Qualitative::NonReactive));
        assert_eq!(serology("AMOSTRA NAO REAGENTE"), Some(Qualitative::NonReactive));
        assert_eq!(serology("Resultado: Reagente"), Some(Qualitative::Reactive));
        assert_eq!(serology("Amostra reagente para HCV"), Some(Qualitative::Reactive));
    }

    #[test]
    fn serology_fallbacks() {
        assert_eq!(serology("Resultado: Indeterminado"), Some(Qualitative::Indeterminate));
        assert_eq!(serology("NEGATIVO"), Some(Qualitative::Negative));
        assert_eq!(serology("positive"), Some(Qualitative::Positive));
        assert_eq!(serology("sem resultado"), None);
    }

    #[test]
    fn dipstick_phrasing() {
        assert_eq!(binary("Negativo"), Some(Qualitative::Negative));
        assert_eq!(binary("ausente"), Some(Qualitative::Negative));
        assert_eq!(binary("Normal"), Some(Qualitative::Negative));
        assert_eq!(binary("Não reagente"), Some(Qualitative::Negative));
        assert_eq!(binary("Positivo"), Some(Qualitative::Positive));
        assert_eq!(binary("Presente"), Some(Qualitative::Positive));
        assert_eq!(binary("++"), Some(Qualitative::Positive));
        assert_eq!(binary("traços"), None);
    }

    #[test]
    fn culture_results() {
        assert_eq!(culture("Negativo"), Some(Qualitative::Negative));
        assert_eq!(
            culture("Não houve crescimento bacteriano até o momento"),
            Some(Qualitative::PartialNegative)
        );
        assert_eq!(culture("Negativo (resultado parcial)"), Some(Qualitative::PartialNegative));
        assert_eq!(culture("Crescimento de Staphylococcus aureus"), Some(Qualitative::Positive));
        assert_eq!(culture("Não foram observados bacilos"), Some(Qualitative::Negative));
        assert_eq!(culture("em processamento"), None);
    }

    #[test]
    fn detection_results() {
        assert_eq!(detection("Não detectado"), Some(Qualitative::NotDetected));
        assert_eq!(detection("DETECTADO"), Some(Qualitative::Detected));
        assert_eq!(detection("pendente"), None);
    }

    #[test]
    fn presence_results() {
        assert_eq!(presence("Ausência de bandas"), Some(Qualitative::Absent));
        assert_eq!(presence("Presença de bandas oligoclonais"), Some(Qualitative::Present));
    }
}
