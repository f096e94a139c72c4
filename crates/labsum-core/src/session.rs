//! Stateful wrapper keeping the last parse for follow-up renders.

use labsum_model::{DateOrder, LabError, Result};
use labsum_report::TableData;

use crate::pipeline::{ParseOutcome, parse};
use crate::store::ParseStats;

/// Holds the outcome of the most recent [`LabSession::parse`].
///
/// Each parse replaces the previous state wholesale; the grouped and table
/// views fail with [`LabError::NotParsed`] until text has been parsed.
#[derive(Debug, Clone, Default)]
pub struct LabSession {
    outcome: Option<ParseOutcome>,
}

impl LabSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `raw` and returns the flat summary.
    pub fn parse(&mut self, raw: &str) -> String {
        let outcome = parse(raw);
        let summary = outcome.summary();
        self.outcome = Some(outcome);
        summary
    }

    pub fn format_by_date(&self, only_most_recent: bool) -> Result<String> {
        Ok(self.outcome()?.by_date(only_most_recent))
    }

    pub fn table_data(&self, order: DateOrder) -> Result<TableData> {
        Ok(self.outcome()?.table(order))
    }

    pub fn stats(&self) -> Option<&ParseStats> {
        self.outcome.as_ref().map(ParseOutcome::stats)
    }

    pub fn outcome(&self) -> Result<&ParseOutcome> {
        self.outcome.as_ref().ok_or(LabError::NotParsed)
    }

    /// Forgets the last parse.
    pub fn clear(&mut self) {
        self.outcome = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SODIUM: &str = "\
10/03/2025 11:00:00 SÓDIO - SANGUE
Coletado em: 10/03/2025 07:00
SÓDIO 139 mEq/L
";

    #[test]
    fn views_require_a_parse() {
        let session = LabSession::new();
        assert!(matches!(session.format_by_date(false), Err(LabError::NotParsed)));
        assert!(matches!(
            session.table_data(DateOrder::Ascending),
            Err(LabError::NotParsed)
        ));
        assert!(session.stats().is_none());
    }

    #[test]
    fn parse_replaces_previous_state() {
        let mut session = LabSession::new();
        let summary = session.parse(SODIUM);
        assert!(summary.contains("- Renal: Na 139"));
        assert!(session.format_by_date(false).unwrap().contains("10/03/2025: Na 139"));

        session.parse("");
        assert!(session.table_data(DateOrder::Ascending).unwrap().is_empty());

        session.clear();
        assert!(session.outcome().is_err());
    }
}
