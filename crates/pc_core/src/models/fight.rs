//! Fight record data structures
//!
//! `FightRecord` is the canonical entity for one tracked bout. The wire
//! field names match the portable scorecard document (`fighterA`,
//! `numRounds`, ...) so exports round-trip against files produced by
//! earlier versions of the app.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SetupError;

/// Minimum length of a fighter name after trimming.
pub const MIN_NAME_LEN: usize = 4;

/// Opaque fight identifier, assigned at creation, stable across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FightId(String);

impl FightId {
    pub fn generate() -> Self {
        FightId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FightId {
    fn from(raw: String) -> Self {
        FightId(raw)
    }
}

impl From<&str> for FightId {
    fn from(raw: &str) -> Self {
        FightId(raw.to_string())
    }
}

/// How a fight ended, other than by going the distance.
///
/// The decision state (all rounds scored, no stoppage) is represented as
/// `None` at the record level; the wire token for it is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "KO")]
    Ko,
    #[serde(rename = "TKO")]
    Tko,
    #[serde(rename = "RTD")]
    Rtd,
    #[serde(rename = "TD")]
    Td,
    #[serde(rename = "DQ")]
    Dq,
    #[serde(rename = "NC")]
    Nc,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Ko => "KO",
            Outcome::Tko => "TKO",
            Outcome::Rtd => "RTD",
            Outcome::Td => "TD",
            Outcome::Dq => "DQ",
            Outcome::Nc => "NC",
        }
    }

    pub fn parse(token: &str) -> Option<Outcome> {
        match token {
            "KO" => Some(Outcome::Ko),
            "TKO" => Some(Outcome::Tko),
            "RTD" => Some(Outcome::Rtd),
            "TD" => Some(Outcome::Td),
            "DQ" => Some(Outcome::Dq),
            "NC" => Some(Outcome::Nc),
            _ => None,
        }
    }

    /// True for outcomes that end the fight with a winner to be selected.
    pub fn needs_winner(self) -> bool {
        !matches!(self, Outcome::Nc)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of the `outcome` field: empty string when unresolved,
/// the uppercase token otherwise.
pub(crate) mod outcome_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Outcome;

    pub fn serialize<S>(value: &Option<Outcome>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.map_or("", |o| o.as_str()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Outcome>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        Outcome::parse(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown outcome token: {raw}")))
    }
}

/// Per-round score pair. `0` means unscored; anything else is 6..=10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundScore {
    pub fighter_a: u8,
    pub fighter_b: u8,
}

impl RoundScore {
    /// Both judges' fields recorded for this round.
    pub fn is_complete(&self) -> bool {
        self.fighter_a > 0 && self.fighter_b > 0
    }
}

/// Valid judge score: unscored, or a point value on the ten-point must system.
pub fn is_valid_score(score: u8) -> bool {
    score == 0 || (6..=10).contains(&score)
}

/// User input for creating a new fight. Validated by [`FightRecord::create`].
#[derive(Debug, Clone)]
pub struct FightSetup {
    pub fighter_a: String,
    pub fighter_b: String,
    pub num_rounds: u32,
    pub fight_date: String,
    pub is_championship: bool,
}

/// The canonical record for one tracked bout.
///
/// Identity and fixed metadata are immutable after creation; `round_scores`
/// and the result fields mutate during scoring. The totals are derived and
/// recomputed inside every ledger mutation, never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightRecord {
    pub id: FightId,
    pub fighter_a: String,
    pub fighter_b: String,
    pub num_rounds: u32,
    pub fight_date: String,
    #[serde(default)]
    pub is_championship: bool,
    #[serde(default)]
    pub round_scores: Vec<RoundScore>,
    #[serde(default)]
    pub fighter_a_total_score: u32,
    #[serde(default)]
    pub fighter_b_total_score: u32,
    /// One of the two fighter names, or empty while unresolved.
    #[serde(default)]
    pub winner: String,
    #[serde(default, with = "outcome_wire")]
    pub outcome: Option<Outcome>,
    /// Derived summary string; empty until the outcome is resolved.
    #[serde(default)]
    pub winner_display: String,
}

impl FightRecord {
    /// Validate the setup and build a fresh record with a zeroed ledger.
    ///
    /// Nothing is mutated on failure; the caller surfaces the error to the
    /// user and keeps its form state.
    pub fn create(setup: FightSetup) -> Result<Self, SetupError> {
        let fighter_a = setup.fighter_a.trim().to_string();
        let fighter_b = setup.fighter_b.trim().to_string();

        if fighter_a.is_empty() {
            return Err(SetupError::MissingField("fighterA"));
        }
        if fighter_b.is_empty() {
            return Err(SetupError::MissingField("fighterB"));
        }
        if setup.fight_date.is_empty() {
            return Err(SetupError::MissingField("fightDate"));
        }
        for name in [&fighter_a, &fighter_b] {
            if name.chars().count() < MIN_NAME_LEN {
                return Err(SetupError::NameTooShort { name: name.clone(), min: MIN_NAME_LEN });
            }
        }
        if setup.num_rounds == 0 {
            return Err(SetupError::ZeroRounds);
        }

        Ok(Self {
            id: FightId::generate(),
            fighter_a,
            fighter_b,
            num_rounds: setup.num_rounds,
            fight_date: setup.fight_date,
            is_championship: setup.is_championship,
            round_scores: vec![RoundScore::default(); setup.num_rounds as usize],
            fighter_a_total_score: 0,
            fighter_b_total_score: 0,
            winner: String::new(),
            outcome: None,
            winner_display: String::new(),
        })
    }

    /// Number of rounds fully scored by both fighters.
    pub fn completed_rounds(&self) -> usize {
        self.round_scores.iter().filter(|r| r.is_complete()).count()
    }

    /// The fight went the full distance: every round scored on both sides.
    pub fn all_rounds_scored(&self) -> bool {
        !self.round_scores.is_empty() && self.round_scores.iter().all(|r| r.is_complete())
    }

    /// The other fighter's name, or `None` if `name` is not registered.
    pub fn opponent_of(&self, name: &str) -> Option<&str> {
        if name == self.fighter_a {
            Some(&self.fighter_b)
        } else if name == self.fighter_b {
            Some(&self.fighter_a)
        } else {
            None
        }
    }
}

/// Today's date in the `YYYY-M-D` form the fight date field carries.
pub fn current_date_string() -> String {
    let today = time::OffsetDateTime::now_utc().date();
    format!("{}-{}-{}", today.year(), u8::from(today.month()), today.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> FightSetup {
        FightSetup {
            fighter_a: "Erik Morales".to_string(),
            fighter_b: "Marco Barrera".to_string(),
            num_rounds: 12,
            fight_date: "2000-2-19".to_string(),
            is_championship: true,
        }
    }

    #[test]
    fn create_initializes_zeroed_ledger() {
        let record = FightRecord::create(setup()).unwrap();

        assert_eq!(record.round_scores.len(), 12);
        assert!(record.round_scores.iter().all(|r| *r == RoundScore::default()));
        assert_eq!(record.fighter_a_total_score, 0);
        assert_eq!(record.fighter_b_total_score, 0);
        assert_eq!(record.outcome, None);
        assert_eq!(record.winner, "");
        assert_eq!(record.winner_display, "");
    }

    #[test]
    fn create_trims_names() {
        let mut s = setup();
        s.fighter_a = "  Erik Morales ".to_string();
        let record = FightRecord::create(s).unwrap();
        assert_eq!(record.fighter_a, "Erik Morales");
    }

    #[test]
    fn create_rejects_short_name() {
        let mut s = setup();
        s.fighter_b = "Bo ".to_string();
        let err = FightRecord::create(s).unwrap_err();
        assert!(matches!(err, SetupError::NameTooShort { .. }));
    }

    #[test]
    fn create_rejects_missing_fields_and_zero_rounds() {
        let mut s = setup();
        s.fighter_a = "   ".to_string();
        assert_eq!(FightRecord::create(s).unwrap_err(), SetupError::MissingField("fighterA"));

        let mut s = setup();
        s.fight_date = String::new();
        assert_eq!(FightRecord::create(s).unwrap_err(), SetupError::MissingField("fightDate"));

        let mut s = setup();
        s.num_rounds = 0;
        assert_eq!(FightRecord::create(s).unwrap_err(), SetupError::ZeroRounds);
    }

    #[test]
    fn ids_are_unique() {
        let a = FightRecord::create(setup()).unwrap();
        let b = FightRecord::create(setup()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn wire_field_names_match_portable_document() {
        let record = FightRecord::create(setup()).unwrap();
        let value: serde_json::Value = serde_json::to_value(&record).unwrap();
        let map = value.as_object().unwrap();

        for field in [
            "id",
            "fighterA",
            "fighterB",
            "numRounds",
            "fightDate",
            "isChampionship",
            "roundScores",
            "fighterATotalScore",
            "fighterBTotalScore",
            "winner",
            "outcome",
            "winnerDisplay",
        ] {
            assert!(map.contains_key(field), "missing wire field {field}");
        }

        assert_eq!(map["outcome"], "");
        assert_eq!(map["roundScores"][0]["fighterA"], 0);
    }

    #[test]
    fn outcome_wire_roundtrip() {
        let mut record = FightRecord::create(setup()).unwrap();
        record.outcome = Some(Outcome::Tko);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"outcome\":\"TKO\""));

        let back: FightRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.outcome, Some(Outcome::Tko));
    }

    #[test]
    fn unknown_outcome_token_is_rejected() {
        let json = r#"{"id":"x","fighterA":"Erik Morales","fighterB":"Marco Barrera",
            "numRounds":4,"fightDate":"2000-2-19","outcome":"SUB"}"#;
        assert!(serde_json::from_str::<FightRecord>(json).is_err());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let json = r#"{"id":"x","fighterA":"Erik Morales","fighterB":"Marco Barrera",
            "numRounds":4,"fightDate":""}"#;
        let record: FightRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.round_scores.len(), 0);
        assert_eq!(record.winner, "");
        assert_eq!(record.outcome, None);
        assert!(!record.is_championship);
    }
}
