use thiserror::Error;

/// Invalid fight setup, surfaced to the caller before any state changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("fighter name must be at least {min} characters: {name:?}")]
    NameTooShort { name: String, min: usize },

    #[error("a fight needs at least one round")]
    ZeroRounds,
}
