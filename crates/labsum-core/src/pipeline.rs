//! End-to-end parse of a raw report dump.
//!
//! # Stages
//!
//! 1. **Preprocess** - strip historical trend sections
//! 2. **Segment** - split into timestamped blocks, dropping invalid ones
//! 3. **Classify** - detect the exam family of each block
//! 4. **Extract** - run the family extractor
//! 5. **Fold** - commit extractions into a fresh [`ParseState`]
//!
//! # Example
//!
//! ```ignore
//! use labsum_core::parse;
//!
//! let outcome = parse(&raw);
//! println!("{}", outcome.summary());
//! ```

use labsum_model::{DateOrder, LabResults, SummaryOptions};
use labsum_report::{TableData, build_table, render_by_date, render_summary};
use tracing::{debug, info, info_span};

use crate::extract::extract;
use crate::preprocess::strip_trend_sections;
use crate::segment::segment;
use crate::store::{ParseState, ParseStats};

/// Immutable result of one parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    results: LabResults,
    stats: ParseStats,
}

impl ParseOutcome {
    pub fn new(results: LabResults, stats: ParseStats) -> Self {
        Self { results, stats }
    }

    /// Flat summary: latest value per exam, one line per category.
    pub fn summary(&self) -> String {
        render_summary(&self.results)
    }

    /// Summary grouped by category and calendar day.
    pub fn by_date(&self, only_most_recent: bool) -> String {
        render_by_date(&self.results, only_most_recent)
    }

    /// Date-pivoted table.
    pub fn table(&self, order: DateOrder) -> TableData {
        build_table(&self.results, order)
    }

    /// Grouped view and table rendered with one set of options.
    pub fn render(&self, options: &SummaryOptions) -> (String, TableData) {
        (
            self.by_date(options.only_most_recent),
            self.table(options.date_order),
        )
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn results(&self) -> &LabResults {
        &self.results
    }

    /// True when no value was extracted.
    pub fn is_empty(&self) -> bool {
        self.results.store.is_empty()
            && self.results.viral.tested.is_empty()
            && self.results.differential.is_none()
    }
}

/// Runs the full pipeline over `raw`.
pub fn parse(raw: &str) -> ParseOutcome {
    let span = info_span!("parse", input_len = raw.len());
    let _guard = span.enter();

    let cleaned = strip_trend_sections(raw);
    let mut state = ParseState::new();
    for candidate in segment(&cleaned) {
        match candidate {
            Ok(block) => {
                debug!(
                    title = block.title(),
                    family = %block.family,
                    collected_at = %block.collected_at,
                    "block accepted"
                );
                let extraction = extract(&block);
                state.apply(&block, extraction);
            }
            Err(reason) => {
                debug!(%reason, "block dropped");
                state.drop_block(reason);
            }
        }
    }

    let (results, stats) = state.finish();
    info!(
        blocks = stats.blocks,
        dropped = stats.dropped(),
        records = stats.records,
        exams = stats.distinct_exams,
        "parse complete"
    );
    ParseOutcome::new(results, stats)
}
