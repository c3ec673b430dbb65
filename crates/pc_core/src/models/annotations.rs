//! Per-round annotations: free-text notes and "close round" flags.
//!
//! Annotations live beside the scoring ledger but have an independent
//! lifecycle: score changes never reset them. They are keyed by round
//! number rather than array position, and only converted to the legacy
//! index-aligned sequences at the persistence boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Annotation for a single round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundAnnotation {
    pub note: String,
    pub is_close: bool,
}

/// All annotations for one fight, keyed by round number (0-based).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundAnnotations {
    rounds: BTreeMap<u32, RoundAnnotation>,
}

impl RoundAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn note(&self, round: u32) -> &str {
        self.rounds.get(&round).map_or("", |a| a.note.as_str())
    }

    pub fn set_note(&mut self, round: u32, note: impl Into<String>) {
        self.rounds.entry(round).or_default().note = note.into();
    }

    pub fn is_close(&self, round: u32) -> bool {
        self.rounds.get(&round).is_some_and(|a| a.is_close)
    }

    /// Flip the close-round flag; returns the new value.
    pub fn toggle_close(&mut self, round: u32) -> bool {
        let entry = self.rounds.entry(round).or_default();
        entry.is_close = !entry.is_close;
        entry.is_close
    }

    /// Index-aligned note sequence for the `fight-<id>-roundNotes` key.
    /// Unannotated rounds below the highest annotated one serialize as
    /// empty strings.
    pub fn notes_wire(&self) -> Vec<String> {
        let len = self.wire_len();
        (0..len).map(|round| self.note(round as u32).to_string()).collect()
    }

    /// Index-aligned flag sequence for the `fight-<id>-closeRounds` key.
    pub fn close_wire(&self) -> Vec<bool> {
        let len = self.wire_len();
        (0..len).map(|round| self.is_close(round as u32)).collect()
    }

    /// Rebuild from the two persisted sequences. Entries may be `null` in
    /// files written by the legacy app (sparse arrays), which reads back
    /// here as `None`.
    pub fn from_wire(notes: Vec<Option<String>>, close: Vec<Option<bool>>) -> Self {
        let mut annotations = Self::new();
        for (round, note) in notes.into_iter().enumerate() {
            if let Some(note) = note {
                if !note.is_empty() {
                    annotations.set_note(round as u32, note);
                }
            }
        }
        for (round, flag) in close.into_iter().enumerate() {
            if flag == Some(true) {
                annotations.rounds.entry(round as u32).or_default().is_close = true;
            }
        }
        annotations
    }

    fn wire_len(&self) -> usize {
        self.rounds.keys().next_back().map_or(0, |last| *last as usize + 1)
    }
}
