//! Persistence gateway: a durable key-value store behind a trait.
//!
//! All fight state is persisted as JSON documents under deterministic
//! keys. Writes are synchronous; a rejected write surfaces a
//! [`StoreError`] to the caller and the in-memory state remains
//! authoritative for the session. There is no automatic retry.
//!
//! Single-writer by design. A multi-process deployment would need
//! optimistic versioning on writes, which this trait does not model.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable string-keyed document store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Deterministic key derivation for everything the core persists.
pub mod keys {
    use crate::models::fight::FightId;

    /// The whole collection, as a sequence of fight records.
    pub const SCORECARDS: &str = "scorecards";

    /// Id of the most recently viewed fight.
    pub const ACTIVE_FIGHT_ID: &str = "activeFightId";

    /// One fight record.
    pub fn fight(id: &FightId) -> String {
        format!("fight-{id}")
    }

    /// Index-aligned note strings for one fight.
    pub fn round_notes(id: &FightId) -> String {
        format!("fight-{id}-roundNotes")
    }

    /// Index-aligned close-round flags for one fight.
    pub fn close_rounds(id: &FightId) -> String {
        format!("fight-{id}-closeRounds")
    }
}
