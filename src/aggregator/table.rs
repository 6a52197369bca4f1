//! The aggregation table: one running summary per distinct station.
//!
//! Station names that differ only in letter case share a single entry.
//! The table remembers the first spelling it saw for each station and
//! reports under that spelling, so input order decides presentation but
//! never the numbers.

use super::summary::Summary;
use crate::parser::Measurement;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// One reportable entry: the first-seen spelling plus its summary
#[derive(Debug, Clone)]
pub struct StationEntry {
    /// Station name as first encountered in the input
    pub station: String,
    /// Running statistics for the station
    pub summary: Summary,
}

/// Map from case-folded station name to its running summary
///
/// `fold` is the only mutation path for records, so a line is either
/// fully applied or not applied at all; there is no partial state for a
/// malformed line to leave behind.
#[derive(Debug, Default)]
pub struct StationTable {
    entries: HashMap<String, StationEntry>,
    // Scratch key reused across folds to avoid an allocation per record
    folded: String,
}

impl StationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parsed record into the table
    ///
    /// **Public** - the hot path; called once per data line
    ///
    /// Case folding applies the Unicode uppercase mapping per character:
    /// `berlin`, `BERLIN`, and `Berlin` share an entry, and so do
    /// `Zürich` and `ZÜRICH`.
    pub fn fold(&mut self, station: &str, value: Measurement) {
        self.folded.clear();
        self.folded
            .extend(station.chars().flat_map(|c| c.to_uppercase()));

        if let Some(entry) = self.entries.get_mut(self.folded.as_str()) {
            entry.summary.observe(value);
        } else {
            self.entries.insert(
                self.folded.clone(),
                StationEntry {
                    station: station.to_string(),
                    summary: Summary::new(value),
                },
            );
        }
    }

    /// Merge another table into this one
    ///
    /// **Public** - combines per-shard tables after a parallel run
    ///
    /// Summaries for shared stations are merged; on a collision the
    /// spelling already present wins, which keeps first-seen casing
    /// stable when shards are merged in input order.
    pub fn merge(&mut self, other: StationTable) {
        for (folded, incoming) in other.entries {
            match self.entries.entry(folded) {
                Entry::Occupied(mut occupied) => {
                    occupied.get_mut().summary.merge(&incoming.summary);
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(incoming);
                }
            }
        }
    }

    /// Entries sorted for reporting
    ///
    /// **Public** - the reporter consumes exactly this order
    ///
    /// Ordered by uppercase-folded name compared as raw bytes, with
    /// ties broken by the first-seen spelling. The sort makes report
    /// order independent of hash-map iteration order.
    pub fn sorted_entries(&self) -> Vec<&StationEntry> {
        let mut entries: Vec<(&String, &StationEntry)> = self.entries.iter().collect();
        entries.sort_unstable_by(|(folded_a, entry_a), (folded_b, entry_b)| {
            folded_a
                .as_bytes()
                .cmp(folded_b.as_bytes())
                .then_with(|| entry_a.station.as_bytes().cmp(entry_b.station.as_bytes()))
        });
        entries.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Number of distinct stations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no record has been folded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a station by any casing of its name
    pub fn get(&self, station: &str) -> Option<&StationEntry> {
        self.entries.get(&station.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Measurement;

    fn m(text: &str) -> Measurement {
        Measurement::parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_fold_creates_and_updates() {
        let mut table = StationTable::new();
        table.fold("Oslo", m("2.0"));
        table.fold("Oslo", m("4.0"));

        assert_eq!(table.len(), 1);
        let entry = table.get("Oslo").unwrap();
        assert_eq!(entry.summary.count(), 2);
        assert_eq!(entry.summary.min(), m("2.0"));
        assert_eq!(entry.summary.max(), m("4.0"));
        assert_eq!(entry.summary.mean(), m("3.0"));
    }

    #[test]
    fn test_case_insensitive_dedup() {
        let mut table = StationTable::new();
        table.fold("Berlin", m("4.0"));
        table.fold("BERLIN", m("8.0"));
        table.fold("berlin", m("0.0"));

        assert_eq!(table.len(), 1);
        let entry = table.get("bErLiN").unwrap();
        assert_eq!(entry.station, "Berlin");
        assert_eq!(entry.summary.count(), 3);
        assert_eq!(entry.summary.mean(), m("4.0"));
    }

    #[test]
    fn test_first_seen_casing_wins() {
        let mut table = StationTable::new();
        table.fold("OSLO", m("1.0"));
        table.fold("Oslo", m("2.0"));
        assert_eq!(table.get("oslo").unwrap().station, "OSLO");
    }

    #[test]
    fn test_unicode_case_variants_share_entry() {
        let mut table = StationTable::new();
        table.fold("ZÜRICH", m("1.0"));
        table.fold("Zürich", m("3.0"));

        assert_eq!(table.len(), 1);
        let entry = table.get("zürich").unwrap();
        assert_eq!(entry.station, "ZÜRICH");
        assert_eq!(entry.summary.count(), 2);
        assert_eq!(entry.summary.mean(), m("2.0"));
    }

    #[test]
    fn test_sorted_entries_order() {
        let mut table = StationTable::new();
        table.fold("Zurich", m("1.0"));
        table.fold("amsterdam", m("1.0"));
        table.fold("Berlin", m("1.0"));

        let names: Vec<&str> = table
            .sorted_entries()
            .iter()
            .map(|e| e.station.as_str())
            .collect();
        assert_eq!(names, vec!["amsterdam", "Berlin", "Zurich"]);
    }

    #[test]
    fn test_sort_order_follows_uppercase_folding() {
        // '_' sits between the uppercase and lowercase letter ranges,
        // so upper-folding puts it after every letter-keyed station
        let mut table = StationTable::new();
        table.fold("_depot", m("1.0"));
        table.fold("Berlin", m("1.0"));

        let names: Vec<&str> = table
            .sorted_entries()
            .iter()
            .map(|e| e.station.as_str())
            .collect();
        assert_eq!(names, vec!["Berlin", "_depot"]);
    }

    #[test]
    fn test_merge_combines_summaries() {
        let mut left = StationTable::new();
        left.fold("Oslo", m("1.0"));
        left.fold("Paris", m("5.0"));

        let mut right = StationTable::new();
        right.fold("oslo", m("3.0"));
        right.fold("Rome", m("7.0"));

        left.merge(right);

        assert_eq!(left.len(), 3);
        let oslo = left.get("Oslo").unwrap();
        assert_eq!(oslo.station, "Oslo");
        assert_eq!(oslo.summary.count(), 2);
        assert_eq!(oslo.summary.mean(), m("2.0"));
    }

    #[test]
    fn test_merge_keeps_existing_casing() {
        let mut first = StationTable::new();
        first.fold("LONDON", m("1.0"));

        let mut second = StationTable::new();
        second.fold("london", m("2.0"));

        first.merge(second);
        assert_eq!(first.get("London").unwrap().station, "LONDON");
    }

    #[test]
    fn test_empty_table() {
        let table = StationTable::new();
        assert!(table.is_empty());
        assert!(table.sorted_entries().is_empty());
    }
}
