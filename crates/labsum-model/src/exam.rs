//! Exam definitions, exam keys and reference ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::Category;

/// What a synonym resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExamTarget {
    /// Canonical abbreviation the exam is reported under.
    Canonical(&'static str),
    /// Matching this synonym ends dictionary lookup without a record.
    Suppressed,
}

/// One synonym entry of the exam dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExamDefinition {
    /// Name variant as it appears in source text.
    pub synonym: &'static str,
    pub target: ExamTarget,
    pub category: Category,
    pub unit: Option<&'static str>,
}

impl ExamDefinition {
    pub const fn new(
        synonym: &'static str,
        abbreviation: &'static str,
        category: Category,
        unit: Option<&'static str>,
    ) -> Self {
        Self {
            synonym,
            target: ExamTarget::Canonical(abbreviation),
            category,
            unit,
        }
    }

    pub const fn suppressed(synonym: &'static str) -> Self {
        Self {
            synonym,
            target: ExamTarget::Suppressed,
            category: Category::Suppressed,
            unit: None,
        }
    }

    /// Canonical abbreviation, or `None` for suppressed entries.
    pub fn abbreviation(&self) -> Option<&'static str> {
        match self.target {
            ExamTarget::Canonical(abbreviation) => Some(abbreviation),
            ExamTarget::Suppressed => None,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self.target, ExamTarget::Suppressed)
    }

    /// Synonym length in characters, the dictionary sort key.
    pub fn synonym_len(&self) -> usize {
        self.synonym.chars().count()
    }
}

/// Identity of an exam in the result store: `(category, abbreviation)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExamKey {
    pub category: Category,
    pub abbreviation: String,
}

impl ExamKey {
    pub fn new(category: Category, abbreviation: impl Into<String>) -> Self {
        Self {
            category,
            abbreviation: abbreviation.into(),
        }
    }

    /// Label used for table rows and reference range lookup.
    pub fn label(&self) -> String {
        match self.category.table_prefix() {
            Some(prefix) => format!("{prefix}{}", self.abbreviation),
            None => self.abbreviation.clone(),
        }
    }
}

impl fmt::Display for ExamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Numeric reference interval; either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl ReferenceRange {
    pub const fn between(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    pub const fn at_most(upper: f64) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
        }
    }

    pub const fn at_least(lower: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    /// Returns true if `value` falls below the lower or above the upper bound.
    pub fn is_outside(&self, value: f64) -> bool {
        self.lower.is_some_and(|lower| value < lower) || self.upper.is_some_and(|upper| value > upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_labels() {
        assert_eq!(ExamKey::new(Category::CerebrospinalFluid, "Glic").label(), "LCR.Glic");
        assert_eq!(ExamKey::new(Category::Urinalysis, "Dens").label(), "U.Dens");
        assert_eq!(ExamKey::new(Category::Metabolic, "Glic").label(), "Glic");
    }

    #[test]
    fn range_bounds() {
        let range = ReferenceRange::between(136.0, 145.0);
        assert!(range.is_outside(148.0));
        assert!(range.is_outside(130.0));
        assert!(!range.is_outside(136.0));
        assert!(!range.is_outside(145.0));
        assert!(!ReferenceRange::at_most(5.0).is_outside(-1.0));
        assert!(ReferenceRange::at_least(40.0).is_outside(39.9));
    }

    #[test]
    fn suppressed_has_no_abbreviation() {
        let entry = ExamDefinition::suppressed("COLESTEROL NÃO-HDL");
        assert!(entry.is_suppressed());
        assert_eq!(entry.abbreviation(), None);
        assert_eq!(entry.synonym_len(), 18);
    }
}
