//! The scorecard collection: every known fight, in insertion order.
//!
//! The collection owns the durable copy of each fight. The active record
//! is mirrored into its matching entry by id; synchronization only ever
//! updates an existing entry, it never inserts one.

use serde::{Deserialize, Serialize};

use crate::models::fight::{FightId, FightRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScorecardCollection {
    records: Vec<FightRecord>,
}

impl ScorecardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FightRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &FightId) -> Option<&FightRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Append a record. Rejects an id already present; records created
    /// through the core always carry a fresh id, so a duplicate means the
    /// caller is re-adding something it should be syncing instead.
    pub fn add(&mut self, record: FightRecord) -> bool {
        if self.get(&record.id).is_some() {
            log::warn!("collection already holds fight {}", record.id);
            return false;
        }
        self.records.push(record);
        true
    }

    /// Remove the entry with this id, returning it if it was present.
    pub fn remove(&mut self, id: &FightId) -> Option<FightRecord> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Records where either fighter name contains `term`, case-insensitive,
    /// in collection order. An empty term matches everything.
    pub fn filter(&self, term: &str) -> Vec<&FightRecord> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.fighter_a.to_lowercase().contains(&needle)
                    || r.fighter_b.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Mirror the result-bearing fields of the active record into the
    /// entry with the same id. Returns whether an entry was updated; a
    /// record not yet in the durable collection is left alone.
    pub fn sync_from_active(&mut self, active: &FightRecord) -> bool {
        let Some(entry) = self.records.iter_mut().find(|r| r.id == active.id) else {
            return false;
        };

        entry.round_scores = active.round_scores.clone();
        entry.fighter_a_total_score = active.fighter_a_total_score;
        entry.fighter_b_total_score = active.fighter_b_total_score;
        entry.winner = active.winner.clone();
        entry.outcome = active.outcome;
        entry.winner_display = active.winner_display.clone();
        true
    }

    /// Append imported records verbatim. Import deliberately does not
    /// deduplicate by id, so re-importing a previous export produces
    /// duplicate entries.
    pub fn extend_imported(&mut self, records: Vec<FightRecord>) {
        self.records.extend(records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fight::FightSetup;

    fn record(a: &str, b: &str) -> FightRecord {
        FightRecord::create(FightSetup {
            fighter_a: a.to_string(),
            fighter_b: b.to_string(),
            num_rounds: 4,
            fight_date: "2024-5-4".to_string(),
            is_championship: false,
        })
        .unwrap()
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut collection = ScorecardCollection::new();
        let fight = record("Erik Morales", "Marco Barrera");

        assert!(collection.add(fight.clone()));
        assert!(!collection.add(fight));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn filter_is_case_insensitive_and_order_preserving() {
        let mut collection = ScorecardCollection::new();
        collection.add(record("Erik Morales", "Marco Barrera"));
        collection.add(record("Manny Pacquiao", "Juan Marquez"));
        collection.add(record("Floyd Mayweather", "Ricky Hatton"));

        let hits = collection.filter("MAR");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].fighter_b, "Marco Barrera");
        assert_eq!(hits[1].fighter_b, "Juan Marquez");

        assert_eq!(collection.filter("").len(), 3);
        assert!(collection.filter("Tyson").is_empty());
    }

    #[test]
    fn sync_updates_only_the_matching_entry() {
        let mut collection = ScorecardCollection::new();
        let mut fight = record("Erik Morales", "Marco Barrera");
        let other = record("Manny Pacquiao", "Juan Marquez");
        collection.add(fight.clone());
        collection.add(other.clone());

        fight.set_score(0, "Erik Morales", 10);
        fight.set_score(0, "Marco Barrera", 9);

        assert!(collection.sync_from_active(&fight));
        let entry = collection.get(&fight.id).unwrap();
        assert_eq!(entry.fighter_a_total_score, 10);
        assert_eq!(entry.round_scores[0].fighter_a, 10);

        let untouched = collection.get(&other.id).unwrap();
        assert_eq!(untouched.fighter_a_total_score, 0);
    }

    #[test]
    fn sync_with_unknown_id_is_a_no_op() {
        let mut collection = ScorecardCollection::new();
        collection.add(record("Erik Morales", "Marco Barrera"));

        let stranger = record("Manny Pacquiao", "Juan Marquez");
        assert!(!collection.sync_from_active(&stranger));
        assert_eq!(collection.len(), 1);
        assert!(collection.get(&stranger.id).is_none());
    }

    #[test]
    fn remove_returns_the_entry() {
        let mut collection = ScorecardCollection::new();
        let fight = record("Erik Morales", "Marco Barrera");
        let id = fight.id.clone();
        collection.add(fight);

        assert!(collection.remove(&id).is_some());
        assert!(collection.remove(&id).is_none());
        assert!(collection.is_empty());
    }

    #[test]
    fn imported_records_bypass_the_duplicate_check() {
        let mut collection = ScorecardCollection::new();
        let fight = record("Erik Morales", "Marco Barrera");
        collection.add(fight.clone());

        collection.extend_imported(vec![fight]);
        assert_eq!(collection.len(), 2);
    }
}
