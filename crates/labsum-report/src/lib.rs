//! Renderers for parsed lab results.
//!
//! - **Flat summary**: latest value per exam, one line per category
//! - **Grouped by date**: every category split into one line per day
//! - **Table**: exams by calendar day, exportable as TSV or JSON

mod common;
mod daily;
mod flat;
mod grouped;
mod table;

pub use common::{full_date, short_date, viral_panel_text};
pub use daily::DailyView;
pub use flat::render_summary;
pub use grouped::render_by_date;
pub use table::{OTHER_GROUP_LABEL, TableData, TableRow, build_table};
