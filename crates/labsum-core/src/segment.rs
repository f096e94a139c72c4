//! Splitting cleaned text into timestamped exam blocks.

use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use labsum_model::ExamFamily;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::classify::classify;

static BLOCK_START_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}:\d{2}").expect("Invalid block start regex")
});

static COLLECTED_AT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Coletado em:\s*(\d{2})/(\d{2})/(\d{4})\s+(\d{2}):(\d{2})(?::(\d{2}))?")
        .expect("Invalid collection time regex")
});

/// Markers of a sample that produced no valid result.
const INVALIDATION_MARKERS: &[&str] = &[
    "MATERIAL COAGULADO",
    "EXAME NÃO REALIZADO",
    "EXAME NAO REALIZADO",
];

/// Why a candidate block was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DropReason {
    /// Clotted sample or exam not performed.
    Invalidated,
    /// No "Coletado em" date and time.
    MissingCollectionTime,
    /// "Coletado em" names a date or time that does not exist (`31/02`).
    InvalidCollectionTime,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::Invalidated => "invalidated",
            DropReason::MissingCollectionTime => "missing-collection-time",
            DropReason::InvalidCollectionTime => "invalid-collection-time",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exam report: its collection time, text and detected family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamBlock<'a> {
    pub collected_at: NaiveDateTime,
    pub text: &'a str,
    pub family: ExamFamily,
}

impl<'a> ExamBlock<'a> {
    pub fn new(collected_at: NaiveDateTime, text: &'a str) -> Self {
        Self {
            collected_at,
            text,
            family: classify(text),
        }
    }

    /// First non-empty line, used to identify the block in logs.
    pub fn title(&self) -> &'a str {
        self.text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
    }
}

/// Raw block texts, each starting at a `dd/mm/yyyy hh:mm:ss` stamp and
/// running up to the next stamp. Text before the first stamp is ignored.
///
/// A stamp following a `label:` on its line (e.g. a release time) is part of
/// the current block, not the start of a new one.
pub fn split_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = BLOCK_START_REGEX
        .find_iter(text)
        .map(|found| found.start())
        .filter(|start| !follows_label(text, *start))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(index, start)| {
            let end = starts.get(index + 1).copied().unwrap_or(text.len());
            &text[*start..end]
        })
        .collect()
}

fn follows_label(text: &str, start: usize) -> bool {
    let line_start = text[..start].rfind('\n').map_or(0, |index| index + 1);
    text[line_start..start].trim_end().ends_with(':')
}

/// Validates one raw block and reads its collection time.
pub fn prepare_block(text: &str) -> Result<ExamBlock<'_>, DropReason> {
    let upper = text.to_uppercase();
    if INVALIDATION_MARKERS
        .iter()
        .any(|marker| upper.contains(marker))
    {
        return Err(DropReason::Invalidated);
    }
    let collected_at = collection_time(text)?;
    Ok(ExamBlock::new(collected_at, text))
}

/// Parses `Coletado em: dd/mm/yyyy hh:mm[:ss]`.
///
/// Impossible dates are rejected, not rolled over into the next month.
pub fn collection_time(text: &str) -> Result<NaiveDateTime, DropReason> {
    let captures = COLLECTED_AT_REGEX
        .captures(text)
        .ok_or(DropReason::MissingCollectionTime)?;
    calendar_time(&captures).ok_or(DropReason::InvalidCollectionTime)
}

fn calendar_time(captures: &Captures<'_>) -> Option<NaiveDateTime> {
    let number = |index: usize| -> Option<u32> { captures.get(index)?.as_str().parse().ok() };
    let day = number(1)?;
    let month = number(2)?;
    let year = i32::try_from(number(3)?).ok()?;
    let hour = number(4)?;
    let minute = number(5)?;
    let second = captures
        .get(6)
        .map_or(Some(0), |found| found.as_str().parse().ok())?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Splits and validates every block of `text`.
pub fn segment(text: &str) -> Vec<Result<ExamBlock<'_>, DropReason>> {
    split_blocks(text).into_iter().map(prepare_block).collect()
}
