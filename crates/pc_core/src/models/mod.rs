pub mod annotations;
pub mod fight;

pub use annotations::{RoundAnnotation, RoundAnnotations};
pub use fight::{
    current_date_string, is_valid_score, FightId, FightRecord, FightSetup, Outcome, RoundScore,
};
