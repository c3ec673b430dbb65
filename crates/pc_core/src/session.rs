//! Session context: the single writer of the active fight.
//!
//! A [`Session`] owns the persistence gateway, the scorecard collection
//! and the currently active fight with its annotations. Every mutating
//! operation applies the in-memory change first, mirrors the result into
//! the collection entry with the same id, and then persists the affected
//! keys - in that order, so a write never captures a stale snapshot. A
//! failed write is reported to the caller while the in-memory state
//! stays authoritative for the rest of the session.
//!
//! Popup-style flows (outcome, winner, notes) commit nothing until their
//! corresponding operation is called; abandoning them needs no cleanup.

use thiserror::Error;

use crate::collection::ScorecardCollection;
use crate::error::SetupError;
use crate::models::annotations::RoundAnnotations;
use crate::models::fight::{FightId, FightRecord, FightSetup, Outcome, RoundScore};
use crate::portable::{export_all, import_batch, ImportError};
use crate::scoring::ResolutionState;
use crate::store::{keys, KeyValueStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("no active fight")]
    NoActiveFight,

    #[error("unknown fight: {0}")]
    UnknownFight(FightId),
}

#[derive(Debug)]
struct ActiveFight {
    record: FightRecord,
    annotations: RoundAnnotations,
}

pub struct Session {
    store: Box<dyn KeyValueStore>,
    collection: ScorecardCollection,
    active: Option<ActiveFight>,
}

impl Session {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store, collection: ScorecardCollection::new(), active: None }
    }

    /// Load the collection, and the most recently viewed fight if there is
    /// one, from the store. Unparsable stored state is logged and skipped
    /// rather than failing the boot.
    pub fn restore(&mut self) -> Result<(), StoreError> {
        if let Some(document) = self.store.get(keys::SCORECARDS)? {
            match serde_json::from_str(&document) {
                Ok(collection) => self.collection = collection,
                Err(err) => log::warn!("error parsing stored scorecards: {err}"),
            }
        }

        if let Some(raw) = self.store.get(keys::ACTIVE_FIGHT_ID)? {
            let id = FightId::from(raw);
            if let Err(err) = self.open_fight(&id) {
                log::warn!("could not restore active fight {id}: {err}");
            }
        }

        Ok(())
    }

    pub fn collection(&self) -> &ScorecardCollection {
        &self.collection
    }

    pub fn active(&self) -> Option<&FightRecord> {
        self.active.as_ref().map(|af| &af.record)
    }

    pub fn active_annotations(&self) -> Option<&RoundAnnotations> {
        self.active.as_ref().map(|af| &af.annotations)
    }

    /// Validate the setup, create the fight, append it to the collection
    /// and make it active. The record and the collection are persisted
    /// before the id is returned.
    pub fn create_fight(&mut self, setup: FightSetup) -> Result<FightId, SessionError> {
        let record = FightRecord::create(setup)?;
        let id = record.id.clone();
        log::info!("created fight {} ({} vs. {})", id, record.fighter_a, record.fighter_b);

        self.collection.add(record.clone());
        self.active = Some(ActiveFight { record, annotations: RoundAnnotations::new() });

        self.persist_active_record()?;
        self.persist_collection()?;
        self.store.set(keys::ACTIVE_FIGHT_ID, id.as_str())?;
        Ok(id)
    }

    /// Make a fight active: prefer its durable copy, fall back to the
    /// collection entry. A loaded record whose ledger was never
    /// initialized (legacy import) is repaired to a zeroed ledger of the
    /// right length.
    pub fn open_fight(&mut self, id: &FightId) -> Result<(), SessionError> {
        let mut record: FightRecord = match self.store.get(&keys::fight(id))? {
            Some(document) => serde_json::from_str(&document).map_err(StoreError::from)?,
            None => self
                .collection
                .get(id)
                .cloned()
                .ok_or_else(|| SessionError::UnknownFight(id.clone()))?,
        };

        if record.round_scores.is_empty() && record.num_rounds > 0 {
            record.round_scores = vec![RoundScore::default(); record.num_rounds as usize];
        }

        let annotations = self.load_annotations(id)?;
        self.store.set(keys::ACTIVE_FIGHT_ID, id.as_str())?;
        self.active = Some(ActiveFight { record, annotations });
        log::info!("opened fight {id}");
        Ok(())
    }

    /// Leave the detail view. The active pointer keeps the most recently
    /// viewed fight, so the next session restores it.
    pub fn close_fight(&mut self) {
        self.active = None;
    }

    /// Remove a fight everywhere: the collection, its record key and both
    /// annotation keys. Deleting an id that is not present only clears
    /// the stored keys. The active fight is dropped if it was the one
    /// deleted.
    pub fn delete_fight(&mut self, id: &FightId) -> Result<(), SessionError> {
        let was_active = self.active.as_ref().is_some_and(|af| &af.record.id == id);
        if was_active {
            self.active = None;
        }
        if self.collection.remove(id).is_some() {
            log::info!("deleted fight {id}");
        }

        self.store.remove(&keys::fight(id))?;
        self.store.remove(&keys::round_notes(id))?;
        self.store.remove(&keys::close_rounds(id))?;
        if was_active {
            self.store.remove(keys::ACTIVE_FIGHT_ID)?;
        }
        self.persist_collection()?;
        Ok(())
    }

    /// Score one round for one fighter on the active fight. Returns
    /// whether the score was applied; a gated or invalid call is a
    /// silent no-op and persists nothing.
    pub fn set_score(&mut self, round: usize, fighter: &str, score: u8) -> Result<bool, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveFight)?;
        if !active.record.set_score(round, fighter, score) {
            return Ok(false);
        }
        self.sync_and_persist_active()?;
        Ok(true)
    }

    /// Choose how the active fight ended. The returned state tells the
    /// caller whether a winner selection must be requested next.
    pub fn set_outcome(&mut self, outcome: Option<Outcome>) -> Result<ResolutionState, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveFight)?;
        let state = active.record.set_outcome(outcome);
        self.sync_and_persist_active()?;
        Ok(state)
    }

    /// Choose the winner for the active fight's pending outcome. Returns
    /// whether the record changed; an unchanged selection persists
    /// nothing.
    pub fn set_winner(&mut self, winner: &str) -> Result<bool, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveFight)?;
        if !active.record.set_winner(winner) {
            return Ok(false);
        }
        self.sync_and_persist_active()?;
        Ok(true)
    }

    /// Save a note for one round of the active fight. Rounds outside the
    /// fight are ignored.
    pub fn save_note(&mut self, round: u32, note: &str) -> Result<(), SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveFight)?;
        if round >= active.record.num_rounds {
            return Ok(());
        }
        active.annotations.set_note(round, note);
        self.persist_annotations()?;
        Ok(())
    }

    /// Flip the close-round flag for one round of the active fight.
    /// Returns the new value.
    pub fn toggle_close_round(&mut self, round: u32) -> Result<bool, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveFight)?;
        if round >= active.record.num_rounds {
            return Ok(false);
        }
        let is_close = active.annotations.toggle_close(round);
        self.persist_annotations()?;
        Ok(is_close)
    }

    /// Records matching a fighter-name search, in collection order.
    pub fn search(&self, term: &str) -> Vec<&FightRecord> {
        self.collection.filter(term)
    }

    /// Merge a portable document into the collection. Malformed input is
    /// reported and leaves the collection unchanged. Returns how many
    /// records were appended.
    pub fn import_scorecards(&mut self, document: &str) -> Result<usize, SessionError> {
        let records = match import_batch(document) {
            Ok(records) => records,
            Err(err) => {
                log::warn!("error parsing the imported file: {err}");
                return Err(err.into());
            }
        };

        let count = records.len();
        self.collection.extend_imported(records);
        self.persist_collection()?;
        Ok(count)
    }

    /// Serialize the whole collection as a portable document.
    pub fn export_scorecards(&self) -> Result<String, SessionError> {
        export_all(&self.collection).map_err(StoreError::from).map_err(SessionError::from)
    }

    fn load_annotations(&self, id: &FightId) -> Result<RoundAnnotations, StoreError> {
        let notes = match self.store.get(&keys::round_notes(id))? {
            Some(document) => serde_json::from_str(&document)?,
            None => Vec::new(),
        };
        let close = match self.store.get(&keys::close_rounds(id))? {
            Some(document) => serde_json::from_str(&document)?,
            None => Vec::new(),
        };
        Ok(RoundAnnotations::from_wire(notes, close))
    }

    /// Mirror the active record into its collection entry, then persist
    /// the record and the collection. Runs after the in-memory mutation
    /// so the write can never capture a stale snapshot.
    fn sync_and_persist_active(&mut self) -> Result<(), StoreError> {
        let Some(active) = self.active.as_ref() else {
            return Ok(());
        };
        self.collection.sync_from_active(&active.record);
        self.persist_active_record()?;
        self.persist_collection()?;
        Ok(())
    }

    fn persist_active_record(&mut self) -> Result<(), StoreError> {
        let Some(active) = self.active.as_ref() else {
            return Ok(());
        };
        let document = serde_json::to_string(&active.record)?;
        self.store.set(&keys::fight(&active.record.id), &document)
    }

    fn persist_annotations(&mut self) -> Result<(), StoreError> {
        let Some(active) = self.active.as_ref() else {
            return Ok(());
        };
        let id = &active.record.id;
        let notes = serde_json::to_string(&active.annotations.notes_wire())?;
        let close = serde_json::to_string(&active.annotations.close_wire())?;
        self.store.set(&keys::round_notes(id), &notes)?;
        self.store.set(&keys::close_rounds(id), &close)
    }

    fn persist_collection(&mut self) -> Result<(), StoreError> {
        let document = serde_json::to_string(&self.collection)?;
        self.store.set(keys::SCORECARDS, &document)
    }
}
