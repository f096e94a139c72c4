//! Parse state folded over extracted blocks.

use chrono::NaiveDateTime;
use labsum_model::LabResults;
use serde::Serialize;
use tracing::debug;

use crate::extract::Extraction;
use crate::logging::redact_value;
use crate::segment::{DropReason, ExamBlock};

/// Counters describing one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Candidate blocks found by segmentation.
    pub blocks: usize,
    pub dropped_invalidated: usize,
    pub dropped_missing_collection_time: usize,
    /// Blocks whose collection date or time does not exist.
    pub dropped_invalid_collection_time: usize,
    /// Accepted blocks that yielded no value.
    pub empty_blocks: usize,
    /// Records committed, superseded ones included.
    pub records: usize,
    /// Distinct `(category, abbreviation)` keys with a value.
    pub distinct_exams: usize,
    pub most_recent: Option<NaiveDateTime>,
}

impl ParseStats {
    pub fn dropped(&self) -> usize {
        self.dropped_invalidated
            + self.dropped_missing_collection_time
            + self.dropped_invalid_collection_time
    }

    /// Blocks that passed validation.
    pub fn accepted(&self) -> usize {
        self.blocks - self.dropped()
    }
}

/// Mutable state of one parse: results plus statistics.
#[derive(Debug, Default)]
pub struct ParseState {
    results: LabResults,
    stats: ParseStats,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &LabResults {
        &self.results
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn drop_block(&mut self, reason: DropReason) {
        self.stats.blocks += 1;
        match reason {
            DropReason::Invalidated => self.stats.dropped_invalidated += 1,
            DropReason::MissingCollectionTime => self.stats.dropped_missing_collection_time += 1,
            DropReason::InvalidCollectionTime => self.stats.dropped_invalid_collection_time += 1,
        }
    }

    /// Folds one block's extraction into the state.
    pub fn apply(&mut self, block: &ExamBlock<'_>, extraction: Extraction) {
        self.stats.blocks += 1;
        if self
            .stats
            .most_recent
            .is_none_or(|current| block.collected_at > current)
        {
            self.stats.most_recent = Some(block.collected_at);
        }
        if extraction.is_empty() {
            self.stats.empty_blocks += 1;
            debug!(title = block.title(), family = %block.family, "block yielded no values");
            return;
        }

        let Extraction {
            records,
            gas,
            differential,
            viral,
        } = extraction;

        for record in records {
            let replaced = self.results.store.commit(record.clone());
            self.stats.records += 1;
            debug!(
                exam = %record.key(),
                value = redact_value(&record.value),
                collected_at = %record.collected_at,
                replaced,
                "record committed"
            );
        }
        if let Some(snapshot) = gas {
            let kind = snapshot.kind;
            let replaced = self.results.gases.record(snapshot);
            debug!(kind = kind.prefix(), replaced, "gas snapshot recorded");
        }
        if let Some(differential) = differential {
            self.results.update_differential(differential);
        }
        for finding in viral {
            self.results.viral.add(finding);
        }
    }

    /// Final results and statistics.
    pub fn finish(mut self) -> (LabResults, ParseStats) {
        self.stats.distinct_exams = self.results.store.len();
        (self.results, self.stats)
    }
}
