//! Reference range flagging.

use labsum_standards::reference_range;

use crate::numeric::first_number;

/// Tokens that are normal whatever the range says.
const NORMAL_EXACT: &[&str] = &["nr", "nd"];
const NORMAL_SUBSTRINGS: &[&str] = &[
    "não reagente",
    "nao reagente",
    "neg",
    "não detectado",
    "nao detectado",
    "ausente",
];

/// True when `value` lies outside the reference range of `label`
/// (`Na`, `GA.pH`, `LCR.Glic`).
///
/// Unknown labels, normal qualitative results and values without a number
/// are never abnormal.
pub fn is_abnormal(label: &str, value: &str) -> bool {
    let Some(range) = reference_range(label) else {
        return false;
    };
    let lowered = value.trim().to_lowercase();
    if NORMAL_EXACT.contains(&lowered.as_str())
        || NORMAL_SUBSTRINGS
            .iter()
            .any(|normal| lowered.contains(normal))
    {
        return false;
    }
    first_number(value).is_some_and(|number| range.is_outside(number))
}
