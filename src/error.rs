//! Game errors

use thiserror::Error;

use crate::session::SessionPhase;

/// Game result type
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("unknown insurance product: {0:?}")]
    UnknownProduct(String),

    #[error("random value {0} outside [0, 1)")]
    InvalidRandomValue(f64),

    #[error("{operation} not allowed in {phase:?}")]
    InvalidTransition {
        operation: &'static str,
        phase: SessionPhase,
    },
}
