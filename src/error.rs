// Error types for pipeline construction, turn validation and map setup

use crate::types::BoardState;

/// Everything that can go wrong while building or running a ruleset
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("stage registry is empty")]
    EmptyRegistry,

    #[error("no stages were provided")]
    NoStages,

    #[error("stage '{0}' not found in registry")]
    StageNotFound(String),

    #[error("stage '{0}' has already been registered")]
    StageAlreadyRegistered(String),

    /// A live snake reached a geometry check with no body
    #[error("snake '{0}' has a zero length body")]
    ZeroLengthSnake(String),

    /// A live snake had no entry in the turn's move list
    #[error("no move found for snake '{0}'")]
    NoMoveFound(String),

    #[error("too many snakes for the board")]
    TooManySnakes,

    #[error("no room for snake")]
    NoRoomForSnake,

    #[error("no room for food")]
    NoRoomForFood,

    #[error("map '{0}' not found")]
    MapNotFound(String),

    /// Failure reported by a custom stage
    #[error("{0}")]
    Stage(String),

    /// Failure reported by a custom map
    #[error("{0}")]
    Map(String),

    #[error("invalid settings: {0}")]
    Config(String),
}

/// Error returned from executing a turn
///
/// `state` holds the board as mutated up to and including the stage that
/// failed. It is `None` when the pipeline could not be constructed and no
/// stage ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct TurnError {
    #[source]
    pub error: RulesError,
    pub state: Option<BoardState>,
}

impl TurnError {
    pub fn construction(error: RulesError) -> Self {
        TurnError { error, state: None }
    }

    pub fn stage(error: RulesError, state: BoardState) -> Self {
        TurnError {
            error,
            state: Some(state),
        }
    }
}
