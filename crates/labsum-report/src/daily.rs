//! One value per exam per calendar day, shared by the grouped and tabular
//! views so both always agree.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use labsum_model::{ExamKey, ResultRecord};

/// History collapsed to the latest reading of each exam per day.
#[derive(Debug, Clone, Default)]
pub struct DailyView<'a> {
    days: BTreeMap<NaiveDate, BTreeMap<ExamKey, &'a ResultRecord>>,
}

impl<'a> DailyView<'a> {
    /// Builds the view from history in commit order.
    ///
    /// Within a day the strictly newest reading wins; equal timestamps keep
    /// the first record seen. With `only_most_recent`, each exam keeps only
    /// the records at its maximum timestamp across the whole history.
    pub fn build(history: &'a [ResultRecord], only_most_recent: bool) -> Self {
        let newest = only_most_recent.then(|| newest_per_key(history));
        let mut days: BTreeMap<NaiveDate, BTreeMap<ExamKey, &'a ResultRecord>> = BTreeMap::new();

        for record in history {
            let key = record.key();
            if let Some(newest) = &newest
                && newest.get(&key) != Some(&record.collected_at)
            {
                continue;
            }
            let slot = days.entry(record.day()).or_default();
            match slot.get(&key) {
                Some(current) if current.collected_at >= record.collected_at => {}
                _ => {
                    slot.insert(key, record);
                }
            }
        }

        Self { days }
    }

    /// Days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Records of one day, keyed by exam.
    pub fn day(&self, day: NaiveDate) -> Option<&BTreeMap<ExamKey, &'a ResultRecord>> {
        self.days.get(&day)
    }

    /// Every exam key present on any day.
    pub fn keys(&self) -> BTreeSet<ExamKey> {
        self.days
            .values()
            .flat_map(|entries| entries.keys().cloned())
            .collect()
    }

    /// `(day, table label, value)` for every cell of the view.
    pub fn triples(&self) -> BTreeSet<(NaiveDate, String, String)> {
        self.days
            .iter()
            .flat_map(|(day, entries)| {
                entries
                    .iter()
                    .map(move |(key, record)| (*day, key.label(), record.value.clone()))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn newest_per_key(history: &[ResultRecord]) -> HashMap<ExamKey, NaiveDateTime> {
    let mut newest: HashMap<ExamKey, NaiveDateTime> = HashMap::new();
    for record in history {
        newest
            .entry(record.key())
            .and_modify(|current| {
                if record.collected_at > *current {
                    *current = record.collected_at;
                }
            })
            .or_insert(record.collected_at);
    }
    newest
}

#[cfg(test)]
mod tests {
    use super::*;
    use labsum_model::Category;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn potassium(value: &str, collected_at: NaiveDateTime) -> ResultRecord {
        ResultRecord::new(Category::Renal, "K", value, collected_at)
    }

    #[test]
    fn latest_reading_of_the_day_wins() {
        let history = vec![
            potassium("4.0", at(1, 10)),
            potassium("3.1", at(1, 6)),
            potassium("4.4", at(2, 6)),
        ];
        let view = DailyView::build(&history, false);
        let triples: Vec<_> = view.triples().into_iter().collect();
        assert_eq!(
            triples,
            vec![
                (at(1, 0).date(), "K".to_string(), "4.0".to_string()),
                (at(2, 0).date(), "K".to_string(), "4.4".to_string()),
            ]
        );
    }

    #[test]
    fn equal_timestamps_keep_first() {
        let history = vec![potassium("4.0", at(1, 10)), potassium("5.0", at(1, 10))];
        let view = DailyView::build(&history, false);
        let day = view.day(at(1, 0).date()).unwrap();
        assert_eq!(day.values().next().unwrap().value, "4.0");
    }

    #[test]
    fn only_most_recent_drops_older_days() {
        let history = vec![
            potassium("4.0", at(1, 10)),
            potassium("4.4", at(2, 6)),
            ResultRecord::new(Category::Renal, "Na", "140", at(1, 8)),
        ];
        let view = DailyView::build(&history, true);
        assert_eq!(view.days().count(), 2);
        let first = view.day(at(1, 0).date()).unwrap();
        assert_eq!(first.len(), 1);
        assert!(first.contains_key(&ExamKey::new(Category::Renal, "Na")));
    }
}
