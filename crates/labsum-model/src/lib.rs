//! Data model for the lab summary workspace.

pub mod enums;
pub mod error;
pub mod exam;
pub mod options;
pub mod record;
pub mod results;

pub use enums::{Category, ExamFamily, GasKind, GasParam, Pathogen, Qualitative};
pub use error::{LabError, Result};
pub use exam::{ExamDefinition, ExamKey, ExamTarget, ReferenceRange};
pub use options::{DateOrder, SummaryOptions};
pub use record::ResultRecord;
pub use results::{
    Differential, GasPanelState, GasSnapshot, LabResults, ResultStore, ViralFinding,
    ViralPanelStatus, ViralPanelTally,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn record_key_and_day() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap();
        let record = ResultRecord::new(Category::Renal, "Na", "140", at);
        assert_eq!(record.key(), ExamKey::new(Category::Renal, "Na"));
        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn record_serializes() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap();
        let record = ResultRecord::qualitative(Category::Serology, "HepC", Qualitative::NonReactive, at);
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: ResultRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round.value, "NR");
        assert_eq!(round, record);
    }
}
