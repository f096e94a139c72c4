//! Accumulated results of one parse: the recency store, blood-gas panels,
//! the leukocyte differential and the CSF viral panel tally.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::enums::{Category, GasKind, GasParam, Pathogen};
use crate::exam::ExamKey;
use crate::record::ResultRecord;

/// Latest record per exam key plus the full commit history.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    latest: HashMap<ExamKey, ResultRecord>,
    /// Keys in the order they were first committed.
    first_seen: Vec<ExamKey>,
    history: Vec<ResultRecord>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to history and makes it the latest for its key when
    /// no record exists yet or it is strictly newer.
    ///
    /// Returns true when the latest entry changed.
    pub fn commit(&mut self, record: ResultRecord) -> bool {
        let key = record.key();
        self.history.push(record.clone());
        match self.latest.get(&key) {
            Some(current) if current.collected_at >= record.collected_at => false,
            Some(_) => {
                self.latest.insert(key, record);
                true
            }
            None => {
                self.first_seen.push(key.clone());
                self.latest.insert(key, record);
                true
            }
        }
    }

    pub fn latest(&self, key: &ExamKey) -> Option<&ResultRecord> {
        self.latest.get(key)
    }

    /// Latest record for `(category, abbreviation)`.
    pub fn get(&self, category: Category, abbreviation: &str) -> Option<&ResultRecord> {
        self.latest.get(&ExamKey::new(category, abbreviation))
    }

    /// Latest records of a category in first-seen order.
    pub fn latest_in(&self, category: Category) -> impl Iterator<Item = &ResultRecord> {
        self.first_seen
            .iter()
            .filter(move |key| key.category == category)
            .filter_map(|key| self.latest.get(key))
    }

    /// Every committed record, in commit order.
    pub fn history(&self) -> &[ResultRecord] {
        &self.history
    }

    /// Number of distinct exam keys.
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

/// One blood-gas panel reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasSnapshot {
    pub kind: GasKind,
    pub collected_at: NaiveDateTime,
    pub values: BTreeMap<GasParam, String>,
}

impl GasSnapshot {
    pub fn new(kind: GasKind, collected_at: NaiveDateTime) -> Self {
        Self {
            kind,
            collected_at,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, param: GasParam) -> Option<&str> {
        self.values.get(&param).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Latest snapshot per gas type plus every snapshot seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GasPanelState {
    venous: Option<GasSnapshot>,
    arterial: Option<GasSnapshot>,
    history: Vec<GasSnapshot>,
}

impl GasPanelState {
    /// Records a snapshot. It becomes the latest for its type only when
    /// strictly newer than the stored one; it always joins the history.
    ///
    /// Returns true when the latest snapshot was replaced.
    pub fn record(&mut self, snapshot: GasSnapshot) -> bool {
        self.history.push(snapshot.clone());
        let slot = match snapshot.kind {
            GasKind::Venous => &mut self.venous,
            GasKind::Arterial => &mut self.arterial,
        };
        match slot.as_ref() {
            Some(current) if current.collected_at >= snapshot.collected_at => false,
            _ => {
                *slot = Some(snapshot);
                true
            }
        }
    }

    pub fn latest(&self, kind: GasKind) -> Option<&GasSnapshot> {
        match kind {
            GasKind::Venous => self.venous.as_ref(),
            GasKind::Arterial => self.arterial.as_ref(),
        }
    }

    pub fn history(&self) -> &[GasSnapshot] {
        &self.history
    }
}

/// Leukocyte differential percentages of the newest blood count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Differential {
    pub collected_at: NaiveDateTime,
    pub neutrophils: Option<String>,
    pub lymphocytes: Option<String>,
    pub monocytes: Option<String>,
    pub eosinophils: Option<String>,
}

impl Differential {
    pub fn new(collected_at: NaiveDateTime) -> Self {
        Self {
            collected_at,
            neutrophils: None,
            lymphocytes: None,
            monocytes: None,
            eosinophils: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells().next().is_none()
    }

    /// `(label, value)` pairs that were reported, in display order.
    pub fn cells(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("N", &self.neutrophils),
            ("Ly", &self.lymphocytes),
            ("Mo", &self.monocytes),
            ("Eo", &self.eosinophils),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|value| (label, value)))
    }
}

/// Outcome of one pathogen on a CSF viral panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViralFinding {
    pub pathogen: Pathogen,
    pub detected: bool,
}

/// Tested and positive pathogens across every CSF block of a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViralPanelTally {
    pub tested: BTreeSet<Pathogen>,
    pub positive: BTreeSet<Pathogen>,
}

/// Summary state of the viral panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViralPanelStatus {
    /// Every pathogen tested, none detected.
    Negative,
    /// At least one pathogen detected.
    Detected {
        positives: Vec<Pathogen>,
        /// Tested and not detected, listed while the panel is incomplete.
        negatives: Vec<Pathogen>,
        complete: bool,
    },
    /// Some pathogens tested, none detected.
    Pending { tested: Vec<Pathogen> },
}

impl ViralPanelTally {
    pub fn add(&mut self, finding: ViralFinding) {
        self.tested.insert(finding.pathogen);
        if finding.detected {
            self.positive.insert(finding.pathogen);
        }
    }

    pub fn is_complete(&self) -> bool {
        Pathogen::PANEL
            .iter()
            .all(|pathogen| self.tested.contains(pathogen))
    }

    /// Panel status, or `None` when nothing was tested.
    pub fn status(&self) -> Option<ViralPanelStatus> {
        if self.tested.is_empty() {
            return None;
        }
        if !self.positive.is_empty() {
            return Some(ViralPanelStatus::Detected {
                positives: self.positive.iter().copied().collect(),
                negatives: self.tested.difference(&self.positive).copied().collect(),
                complete: self.is_complete(),
            });
        }
        if self.is_complete() {
            Some(ViralPanelStatus::Negative)
        } else {
            Some(ViralPanelStatus::Pending {
                tested: self.tested.iter().copied().collect(),
            })
        }
    }
}

/// Everything one parse accumulates for rendering.
#[derive(Debug, Clone, Default)]
pub struct LabResults {
    pub store: ResultStore,
    pub gases: GasPanelState,
    pub differential: Option<Differential>,
    pub viral: ViralPanelTally,
}

impl LabResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `differential` when it comes from a strictly newer blood count.
    pub fn update_differential(&mut self, differential: Differential) -> bool {
        match &self.differential {
            Some(current) if current.collected_at >= differential.collected_at => false,
            _ => {
                self.differential = Some(differential);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sodium(value: &str, collected_at: NaiveDateTime) -> ResultRecord {
        ResultRecord::new(Category::Renal, "Na", value, collected_at)
    }

    #[test]
    fn newer_record_replaces_latest() {
        let mut store = ResultStore::new();
        assert!(store.commit(sodium("140", at(1, 8))));
        assert!(store.commit(sodium("145", at(2, 8))));
        assert!(!store.commit(sodium("130", at(1, 9))));
        assert_eq!(store.get(Category::Renal, "Na").unwrap().value, "145");
        assert_eq!(store.history().len(), 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn tie_keeps_first_writer() {
        let mut store = ResultStore::new();
        store.commit(sodium("140", at(1, 8)));
        assert!(!store.commit(sodium("141", at(1, 8))));
        assert_eq!(store.get(Category::Renal, "Na").unwrap().value, "140");
    }

    #[test]
    fn same_abbreviation_in_two_categories() {
        let mut store = ResultStore::new();
        store.commit(ResultRecord::new(Category::Metabolic, "Glic", "90", at(1, 8)));
        store.commit(ResultRecord::new(
            Category::CerebrospinalFluid,
            "Glic",
            "60",
            at(1, 8),
        ));
        assert_eq!(store.len(), 2);
        let first_seen: Vec<_> = store.latest_in(Category::Metabolic).collect();
        assert_eq!(first_seen.len(), 1);
        assert_eq!(first_seen[0].value, "90");
    }

    #[test]
    fn older_gas_snapshot_only_joins_history() {
        let mut gases = GasPanelState::default();
        let mut newer = GasSnapshot::new(GasKind::Arterial, at(2, 8));
        newer.values.insert(GasParam::Ph, "7.40".to_string());
        let mut older = GasSnapshot::new(GasKind::Arterial, at(1, 8));
        older.values.insert(GasParam::Lactate, "3.1".to_string());

        assert!(gases.record(newer));
        assert!(!gases.record(older));
        let latest = gases.latest(GasKind::Arterial).unwrap();
        assert_eq!(latest.get(GasParam::Ph), Some("7.40"));
        assert_eq!(latest.get(GasParam::Lactate), None);
        assert_eq!(gases.history().len(), 2);
        assert!(gases.latest(GasKind::Venous).is_none());
    }

    #[test]
    fn viral_status() {
        let mut tally = ViralPanelTally::default();
        assert_eq!(tally.status(), None);
        for pathogen in &Pathogen::PANEL[..4] {
            tally.add(ViralFinding {
                pathogen: *pathogen,
                detected: false,
            });
        }
        assert_eq!(
            tally.status(),
            Some(ViralPanelStatus::Pending {
                tested: Pathogen::PANEL[..4].to_vec()
            })
        );
        for pathogen in Pathogen::PANEL {
            tally.add(ViralFinding {
                pathogen,
                detected: false,
            });
        }
        assert_eq!(tally.status(), Some(ViralPanelStatus::Negative));
        tally.add(ViralFinding {
            pathogen: Pathogen::Hsv1,
            detected: true,
        });
        assert_eq!(
            tally.status(),
            Some(ViralPanelStatus::Detected {
                positives: vec![Pathogen::Hsv1],
                negatives: Pathogen::PANEL[1..].to_vec(),
                complete: true
            })
        );
    }

    #[test]
    fn incomplete_panel_with_positive_keeps_negatives() {
        let mut tally = ViralPanelTally::default();
        tally.add(ViralFinding {
            pathogen: Pathogen::Hsv2,
            detected: false,
        });
        tally.add(ViralFinding {
            pathogen: Pathogen::Enterovirus,
            detected: true,
        });
        assert_eq!(
            tally.status(),
            Some(ViralPanelStatus::Detected {
                positives: vec![Pathogen::Enterovirus],
                negatives: vec![Pathogen::Hsv2],
                complete: false
            })
        );
    }

    #[test]
    fn differential_keeps_newest() {
        let mut results = LabResults::new();
        let mut first = Differential::new(at(2, 8));
        first.neutrophils = Some("70".to_string());
        let mut second = Differential::new(at(1, 8));
        second.neutrophils = Some("50".to_string());
        assert!(results.update_differential(first));
        assert!(!results.update_differential(second));
        let cells: Vec<_> = results.differential.as_ref().unwrap().cells().collect();
        assert_eq!(cells, vec![("N", "70")]);
    }
}
