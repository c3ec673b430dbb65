//! # pc_core - Punch Card fight scorecard core
//!
//! Core library for tracking boxing fight scorecards: per-round judging
//! scores for two fighters, round annotations, outcome and winner
//! resolution, a searchable collection of past fights, and durable
//! storage with backward-compatible import migration.
//!
//! ## Features
//! - Strictly sequential round scoring with derived totals
//! - Explicit fight-resolution state machine (decision, stoppage, NC)
//! - Collection synchronization keyed by fight id
//! - Pluggable key-value persistence (in-memory and file-backed)
//! - Portable JSON export/import accepting legacy field names
//!
//! All mutations run single-threaded and synchronously: derived fields
//! are recomputed inside the mutation that changes them, and persistence
//! writes always follow the in-memory change they record.

pub mod collection;
pub mod error;
pub mod models;
pub mod portable;
pub mod scoring;
pub mod session;
pub mod store;

pub use collection::ScorecardCollection;
pub use error::SetupError;
pub use models::{
    current_date_string, FightId, FightRecord, FightSetup, Outcome, RoundAnnotation,
    RoundAnnotations, RoundScore,
};
pub use portable::{export_all, import_batch, migrate_entry, ImportError};
pub use scoring::{ResolutionState, NO_CONTEST};
pub use session::{Session, SessionError};
pub use store::{keys, FileStore, KeyValueStore, MemoryStore, StoreError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
