//! Result resolution: totals, outcome and winner selection.
//!
//! The resolution state is an explicit value derived from the record, so
//! callers can drive which interaction is currently permitted (e.g. only
//! prompt for a winner while `WinnerPending`) without tracking ad-hoc
//! flags of their own.

use serde::{Deserialize, Serialize};

use crate::models::fight::{FightRecord, Outcome};

/// Display string used whenever the outcome is a no contest.
pub const NO_CONTEST: &str = "No Contest";

/// Where a fight stands in its resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionState {
    /// No outcome chosen and rounds still open.
    Undecided,
    /// An outcome was just selected and its consequence has not been
    /// applied yet. Transient inside [`FightRecord::set_outcome`]; a record
    /// at rest is never in this state.
    OutcomeChosen,
    /// A fight-ending outcome is set and the winner still has to be picked.
    WinnerPending,
    /// Fully resolved: stoppage with winner, or a decision with every
    /// round scored.
    Resolved,
    /// Resolved as a no contest; there is no winner.
    NoContest,
}

impl ResolutionState {
    /// Resolved either way, with or without a winner.
    pub fn is_resolved(self) -> bool {
        matches!(self, ResolutionState::Resolved | ResolutionState::NoContest)
    }
}

/// `"<winner> <outcome> <loser>"`, or the fixed no-contest string, or empty
/// while unresolved. Pure in the four inputs; every resolver mutation
/// reassigns `winner_display` through this function.
fn derive_winner_display(
    fighter_a: &str,
    fighter_b: &str,
    winner: &str,
    outcome: Option<Outcome>,
) -> String {
    match outcome {
        None => String::new(),
        Some(Outcome::Nc) => NO_CONTEST.to_string(),
        Some(outcome) => {
            let loser = if winner == fighter_a {
                fighter_b
            } else if winner == fighter_b {
                fighter_a
            } else {
                return String::new();
            };
            format!("{winner} {outcome} {loser}")
        }
    }
}

impl FightRecord {
    /// Re-derive both totals from the ledger. Called inside every scoring
    /// mutation so no caller can observe stale totals.
    pub fn recompute_totals(&mut self) {
        self.fighter_a_total_score =
            self.round_scores.iter().map(|r| u32::from(r.fighter_a)).sum();
        self.fighter_b_total_score =
            self.round_scores.iter().map(|r| u32::from(r.fighter_b)).sum();
    }

    /// Current resolution state, derived from the record fields.
    pub fn resolution_state(&self) -> ResolutionState {
        match self.outcome {
            Some(Outcome::Nc) => ResolutionState::NoContest,
            Some(_) if self.winner.is_empty() => ResolutionState::WinnerPending,
            Some(_) => ResolutionState::Resolved,
            None if self.all_rounds_scored() => ResolutionState::Resolved,
            None => ResolutionState::Undecided,
        }
    }

    /// Select how the fight ended (or `None` to withdraw the selection).
    ///
    /// Returns the state the record settles in; `WinnerPending` tells the
    /// caller to request a winner selection next. A previously chosen
    /// winner survives an outcome edit, with the display rebuilt around
    /// the new outcome. `NC` always clears the winner.
    pub fn set_outcome(&mut self, outcome: Option<Outcome>) -> ResolutionState {
        self.outcome = outcome;

        if outcome == Some(Outcome::Nc) {
            self.winner.clear();
        }
        self.winner_display =
            derive_winner_display(&self.fighter_a, &self.fighter_b, &self.winner, self.outcome);

        self.resolution_state()
    }

    /// Select the winner for a fight-ending outcome. Returns whether the
    /// record changed; repeating a selection is a no-op, as is a name that
    /// is not one of the two fighters or a call without a pending outcome.
    pub fn set_winner(&mut self, winner: &str) -> bool {
        let Some(outcome) = self.outcome else {
            return false;
        };
        if !outcome.needs_winner() || self.opponent_of(winner).is_none() {
            return false;
        }

        let display = derive_winner_display(&self.fighter_a, &self.fighter_b, winner, Some(outcome));
        if display == self.winner_display {
            return false;
        }

        self.winner = winner.to_string();
        self.winner_display = display;
        true
    }

    /// One-line result summary for collection list display.
    ///
    /// Stoppage wins read `"<winner last name> <outcome> <round>"` with the
    /// round the fight ended in; full-distance fights show the user's card;
    /// a no contest is labeled as such. Unresolved fights show nothing.
    pub fn card_summary(&self) -> Option<String> {
        match self.outcome {
            Some(o @ (Outcome::Ko | Outcome::Tko | Outcome::Rtd | Outcome::Td)) => {
                if self.winner.is_empty() {
                    return None;
                }
                let last_name =
                    self.winner.split_whitespace().nth(1).unwrap_or(self.winner.as_str());
                Some(format!("{} {} {}", last_name, o, self.completed_rounds() + 1))
            }
            _ if self.all_rounds_scored() => Some(format!(
                "Your Score: {}-{}",
                self.fighter_a_total_score, self.fighter_b_total_score
            )),
            Some(Outcome::Nc) => Some(NO_CONTEST.to_string()),
            _ => None,
        }
    }
}
