// Solo ruleset
//
// Same turn mechanics as the standard ruleset; the game only ends once the
// last snake is gone.

use crate::error::RulesError;
use crate::pipeline::{
    STAGE_ELIMINATION_STANDARD, STAGE_FEED_SNAKES_STANDARD, STAGE_GAME_OVER_SOLO_SNAKE,
    STAGE_MOVEMENT_STANDARD, STAGE_STARVATION_STANDARD,
};
use crate::settings::Settings;
use crate::types::{BoardState, SnakeMove};

pub const SOLO_RULESET_STAGES: [&str; 5] = [
    STAGE_GAME_OVER_SOLO_SNAKE,
    STAGE_MOVEMENT_STANDARD,
    STAGE_STARVATION_STANDARD,
    STAGE_FEED_SNAKES_STANDARD,
    STAGE_ELIMINATION_STANDARD,
];

/// Game ends when no snake is left
pub fn game_over_solo(
    b: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    Ok(b.alive_count() == 0)
}
