//! Rendering options for summaries and tables.

use serde::{Deserialize, Serialize};

/// Column order of the date-pivoted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateOrder {
    /// Oldest day first.
    #[default]
    Ascending,
    /// Most recent day first.
    Descending,
}

impl DateOrder {
    /// Returns the opposite order (the table toggle).
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            DateOrder::Ascending => DateOrder::Descending,
            DateOrder::Descending => DateOrder::Ascending,
        }
    }
}

/// Options controlling the grouped and tabular views.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Restrict each exam to its most recent collection time.
    pub only_most_recent: bool,
    /// Column order for the table view.
    pub date_order: DateOrder,
}

impl SummaryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only_most_recent(mut self, enable: bool) -> Self {
        self.only_most_recent = enable;
        self
    }

    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }
}
