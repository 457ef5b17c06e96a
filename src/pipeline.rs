// Stage registry and pipeline
//
// A pipeline is an ordered list of stages resolved by name from a registry.
// Each stage gets the same mutable board in turn; the first stage that errors
// or ends the game halts the pipeline.

use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{RulesError, TurnError};
use crate::settings::Settings;
use crate::solo::game_over_solo;
use crate::standard::{
    eliminate_snakes_standard, feed_snakes_standard, game_over_standard, move_snakes_standard,
    reduce_snake_health_standard,
};
use crate::types::{BoardState, SnakeMove};

pub const STAGE_GAME_OVER_STANDARD: &str = "game_over.standard";
pub const STAGE_STARVATION_STANDARD: &str = "starvation.standard";
pub const STAGE_FEED_SNAKES_STANDARD: &str = "feed_snakes.standard";
pub const STAGE_MOVEMENT_STANDARD: &str = "movement.standard";
pub const STAGE_ELIMINATION_STANDARD: &str = "elimination.standard";
pub const STAGE_GAME_OVER_SOLO_SNAKE: &str = "game_over.solo_snake";

/// A single stage of a pipeline
///
/// Mutates the board in place and returns whether the game has ended. An
/// error means the stage failed and the board should be treated as invalid.
pub type StageFn =
    Arc<dyn Fn(&mut BoardState, &Settings, &[SnakeMove]) -> Result<bool, RulesError> + Send + Sync>;

/// Result of a successfully executed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub game_over: bool,
    pub state: BoardState,
}

/// True when the turn has not advanced and no moves were sent
pub fn is_initialization(board: &BoardState, _settings: &Settings, moves: &[SnakeMove]) -> bool {
    board.turn <= 0 && moves.is_empty()
}

/// Mapping of stage names to stage functions
#[derive(Clone, Default)]
pub struct StageRegistry {
    stages: HashMap<String, StageFn>,
}

impl StageRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        StageRegistry::default()
    }

    /// Registry holding every built-in stage
    pub fn standard() -> Self {
        let mut registry = StageRegistry::new();
        registry.register(STAGE_GAME_OVER_SOLO_SNAKE, game_over_solo);
        registry.register(STAGE_GAME_OVER_STANDARD, game_over_standard);
        registry.register(STAGE_STARVATION_STANDARD, reduce_snake_health_standard);
        registry.register(STAGE_FEED_SNAKES_STANDARD, feed_snakes_standard);
        registry.register(STAGE_ELIMINATION_STANDARD, eliminate_snakes_standard);
        registry.register(STAGE_MOVEMENT_STANDARD, move_snakes_standard);
        registry
    }

    /// Adds a stage, silently replacing any stage with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, stage: F)
    where
        F: Fn(&mut BoardState, &Settings, &[SnakeMove]) -> Result<bool, RulesError>
            + Send
            + Sync
            + 'static,
    {
        self.stages.insert(name.into(), Arc::new(stage));
    }

    /// Adds a stage, failing if the name is already taken
    pub fn try_register<F>(&mut self, name: impl Into<String>, stage: F) -> Result<(), RulesError>
    where
        F: Fn(&mut BoardState, &Settings, &[SnakeMove]) -> Result<bool, RulesError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self.stages.contains_key(&name) {
            return Err(RulesError::StageAlreadyRegistered(name));
        }
        self.register(name, stage);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&StageFn> {
        self.stages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.stages.keys().collect();
        names.sort();
        f.debug_struct("StageRegistry").field("stages", &names).finish()
    }
}

#[derive(Clone)]
struct NamedStage {
    name: String,
    run: StageFn,
}

/// Ordered sequence of stages producing the next board state
///
/// Construction problems are captured rather than returned so that
/// `Pipeline::from_registry(..).execute(..)` reads naturally; every call to
/// `execute` on a broken pipeline returns the same error without running
/// anything.
#[derive(Clone)]
pub struct Pipeline {
    stages: Vec<NamedStage>,
    err: Option<RulesError>,
}

impl Pipeline {
    /// Builds a pipeline from the built-in stages
    pub fn new<S: AsRef<str>>(stage_names: &[S]) -> Self {
        Self::from_registry(&StageRegistry::standard(), stage_names)
    }

    pub fn from_registry<S: AsRef<str>>(registry: &StageRegistry, stage_names: &[S]) -> Self {
        match Self::resolve(registry, stage_names) {
            Ok(stages) => Pipeline { stages, err: None },
            Err(e) => {
                warn!("Pipeline construction failed: {}", e);
                Pipeline {
                    stages: Vec::new(),
                    err: Some(e),
                }
            }
        }
    }

    fn resolve<S: AsRef<str>>(
        registry: &StageRegistry,
        stage_names: &[S],
    ) -> Result<Vec<NamedStage>, RulesError> {
        if registry.is_empty() {
            return Err(RulesError::EmptyRegistry);
        }
        if stage_names.is_empty() {
            return Err(RulesError::NoStages);
        }

        stage_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                registry
                    .get(name)
                    .map(|run| NamedStage {
                        name: name.to_string(),
                        run: Arc::clone(run),
                    })
                    .ok_or_else(|| RulesError::StageNotFound(name.to_string()))
            })
            .collect()
    }

    /// Construction error, if any
    pub fn err(&self) -> Option<&RulesError> {
        self.err.as_ref()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }

    /// Runs every stage against a clone of `state`
    pub fn execute(
        &self,
        state: &BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<TurnOutcome, TurnError> {
        if let Some(e) = &self.err {
            return Err(TurnError::construction(e.clone()));
        }

        let mut next = state.clone();
        for stage in &self.stages {
            debug!("Turn {}: running stage {}", next.turn, stage.name);
            match (stage.run)(&mut next, settings, moves) {
                Ok(false) => {}
                Ok(true) => {
                    debug!("Turn {}: game ended in stage {}", next.turn, stage.name);
                    return Ok(TurnOutcome {
                        game_over: true,
                        state: next,
                    });
                }
                Err(e) => {
                    warn!("Turn {}: stage {} failed: {}", next.turn, stage.name, e);
                    return Err(TurnError::stage(e, next));
                }
            }
        }

        Ok(TurnOutcome {
            game_over: false,
            state: next,
        })
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .field("err", &self.err)
            .finish()
    }
}
