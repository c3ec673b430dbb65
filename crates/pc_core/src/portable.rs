//! Portable scorecard documents: export, import and legacy migration.
//!
//! The portable format is a JSON array of fight records, as written by
//! every version of the app. Older versions named the round count
//! `numRound` or `rounds` and the fight date `date`; migration resolves
//! those to the canonical names before deserialization.
//!
//! Import never deduplicates by id: re-importing a previous export
//! produces duplicate collection entries. Kept as observed behavior.

use serde_json::{json, Value};
use thiserror::Error;

use crate::collection::ScorecardCollection;
use crate::models::fight::FightRecord;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("import document is not a sequence of scorecards")]
    NotASequence,

    #[error("scorecard entry {index} is not importable: {source}")]
    BadEntry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolve legacy field names on one raw entry.
///
/// Round count: `numRounds`, else `numRound`, else `rounds`, else `0`.
/// Fight date: `fightDate`, else `date`, else `""`. All other fields pass
/// through untouched; non-object entries are returned as-is and fail
/// deserialization later.
pub fn migrate_entry(mut entry: Value) -> Value {
    let Some(map) = entry.as_object_mut() else {
        return entry;
    };

    let legacy_rounds = map.remove("numRound");
    let legacy_rounds = legacy_rounds.or_else(|| map.remove("rounds"));
    if !map.contains_key("numRounds") {
        map.insert("numRounds".to_string(), legacy_rounds.unwrap_or_else(|| json!(0)));
    }

    let legacy_date = map.remove("date");
    if !map.contains_key("fightDate") {
        map.insert("fightDate".to_string(), legacy_date.unwrap_or_else(|| json!("")));
    }

    entry
}

/// Parse a portable document into fight records, migrating each entry.
///
/// All-or-nothing: any malformed entry fails the whole batch, so a caller
/// that appends the result to its collection never takes a partial import.
pub fn import_batch(document: &str) -> Result<Vec<FightRecord>, ImportError> {
    let parsed: Value = serde_json::from_str(document).map_err(ImportError::Parse)?;
    let Value::Array(entries) = parsed else {
        return Err(ImportError::NotASequence);
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, raw) in entries.into_iter().enumerate() {
        let migrated = migrate_entry(raw);
        let record = serde_json::from_value(migrated)
            .map_err(|source| ImportError::BadEntry { index, source })?;
        records.push(record);
    }

    log::info!("imported {} scorecard(s)", records.len());
    Ok(records)
}

/// Serialize the whole collection, pretty-printed with stable field
/// order, suitable for round-tripping through [`import_batch`].
pub fn export_all(collection: &ScorecardCollection) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(collection)
}
