//! Extraction engine for HCMED-style lab report dumps.
//!
//! [`parse`] turns raw report text into a [`ParseOutcome`] that renders the
//! flat summary, the grouped-by-date view and the date-pivoted table.
//! [`LabSession`] keeps the last outcome for callers that render in steps.

pub mod abnormality;
pub mod classify;
pub mod extract;
pub mod logging;
pub mod numeric;
pub mod pipeline;
pub mod preprocess;
pub mod segment;
pub mod session;
pub mod store;

pub use abnormality::is_abnormal;
pub use classify::classify;
pub use extract::{Extraction, Extractor, extract, extractor_for};
pub use labsum_report::{TableData, TableRow};
pub use numeric::{first_number, normalize_decimal};
pub use pipeline::{ParseOutcome, parse};
pub use preprocess::strip_trend_sections;
pub use segment::{DropReason, ExamBlock, segment};
pub use session::LabSession;
pub use store::{ParseState, ParseStats};
