//! Extracted result records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::enums::{Category, Qualitative};
use crate::exam::ExamKey;

/// One extracted value, tagged with its exam and collection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub abbreviation: String,
    pub category: Category,
    /// Normalized numeric (`12.5`), less-than numeric (`<0.10`) or a
    /// qualitative token.
    pub value: String,
    pub collected_at: NaiveDateTime,
}

impl ResultRecord {
    pub fn new(
        category: Category,
        abbreviation: impl Into<String>,
        value: impl Into<String>,
        collected_at: NaiveDateTime,
    ) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            category,
            value: value.into(),
            collected_at,
        }
    }

    pub fn qualitative(
        category: Category,
        abbreviation: impl Into<String>,
        value: Qualitative,
        collected_at: NaiveDateTime,
    ) -> Self {
        Self::new(category, abbreviation, value.token(), collected_at)
    }

    pub fn key(&self) -> ExamKey {
        ExamKey::new(self.category, self.abbreviation.clone())
    }

    /// Calendar day of collection.
    pub fn day(&self) -> NaiveDate {
        self.collected_at.date()
    }
}
