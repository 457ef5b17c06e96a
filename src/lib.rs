// Rules engine for multiplayer snake games
// Resolves one turn at a time through a pipeline of named stages

pub mod board;
pub mod error;
pub mod maps;
pub mod pipeline;
pub mod rng;
pub mod ruleset;
pub mod settings;
pub mod solo;
pub mod standard;
pub mod types;

pub use error::{RulesError, TurnError};
pub use maps::{BoardStateEditor, Editor, GameMap, MapRegistry, StandardMap};
pub use pipeline::{Pipeline, StageFn, StageRegistry, TurnOutcome};
pub use rng::{FixedRand, GameRand, Rand};
pub use ruleset::{PipelineRuleset, Ruleset, RulesetBuilder, RulesetConfig};
pub use settings::Settings;
pub use types::{BoardState, Direction, EliminationCause, Point, Snake, SnakeMove};
