// Round scoring and fight resolution for the active record.

pub mod ledger;
pub mod resolver;

pub use resolver::{ResolutionState, NO_CONTEST};
