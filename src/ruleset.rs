// Rulesets: a pipeline bound to the settings of one game
//
// RulesetBuilder turns a game type name ("standard", "solo") plus a
// RulesetConfig into a ready-to-run ruleset.

use log::info;
use std::collections::HashMap;

use crate::error::{RulesError, TurnError};
use crate::pipeline::{
    Pipeline, StageRegistry, TurnOutcome, STAGE_GAME_OVER_SOLO_SNAKE, STAGE_GAME_OVER_STANDARD,
};
use crate::rng::FixedRand;
use crate::settings::Settings;
use crate::solo::SOLO_RULESET_STAGES;
use crate::standard::STANDARD_RULESET_STAGES;
use crate::types::{BoardState, SnakeMove, GAME_TYPE_SOLO, GAME_TYPE_STANDARD};

/// Anything that can resolve a turn
pub trait Ruleset: Send + Sync {
    fn name(&self) -> &str;

    fn settings(&self) -> &Settings;

    /// Produces the next board from `prev` and this turn's moves.
    /// `prev` is never modified.
    fn execute(&self, prev: &BoardState, moves: &[SnakeMove]) -> Result<TurnOutcome, TurnError>;
}

/// Ruleset that runs a fixed pipeline
#[derive(Debug, Clone)]
pub struct PipelineRuleset {
    name: String,
    pipeline: Pipeline,
    settings: Settings,
}

impl PipelineRuleset {
    pub fn new(name: impl Into<String>, pipeline: Pipeline, settings: Settings) -> Self {
        PipelineRuleset {
            name: name.into(),
            pipeline,
            settings,
        }
    }

    /// Pipeline construction error, if any
    pub fn err(&self) -> Option<&RulesError> {
        self.pipeline.err()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl Ruleset for PipelineRuleset {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn execute(&self, prev: &BoardState, moves: &[SnakeMove]) -> Result<TurnOutcome, TurnError> {
        self.pipeline.execute(prev, &self.settings, moves)
    }
}

/// Inputs for building a ruleset
#[derive(Debug, Clone, Default)]
pub struct RulesetConfig {
    pub params: HashMap<String, String>,
    pub seed: i64,
    /// Use the solo game-over check
    pub solo: bool,
    /// Fixed random source replacing the seeded one
    pub rand: Option<FixedRand>,
    /// Settings used as-is, ignoring `params`, `seed` and `rand`
    pub settings: Option<Settings>,
}

impl RulesetConfig {
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_solo(mut self, solo: bool) -> Self {
        self.solo = solo;
        self
    }

    pub fn with_rand(mut self, rand: FixedRand) -> Self {
        self.rand = Some(rand);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Assembles rulesets from a config and a stage registry
#[derive(Debug, Clone)]
pub struct RulesetBuilder {
    config: RulesetConfig,
    registry: StageRegistry,
}

impl RulesetBuilder {
    pub fn new(config: RulesetConfig) -> Self {
        RulesetBuilder {
            config,
            registry: StageRegistry::standard(),
        }
    }

    /// Resolves stages from `registry` instead of the built-in one
    pub fn with_registry(mut self, registry: StageRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Settings every ruleset from this builder runs with
    pub fn settings(&self) -> Settings {
        if let Some(settings) = &self.config.settings {
            return settings.clone();
        }

        let settings = Settings::new(self.config.params.clone()).with_seed(self.config.seed);
        match self.config.rand {
            Some(rand) => settings.with_rand(rand),
            None => settings,
        }
    }

    /// Builds the ruleset for a game type
    ///
    /// "standard" and "solo" get their full stage lists; any other name only
    /// runs the game-over check selected by the `solo` flag.
    pub fn named_ruleset(&self, name: &str) -> PipelineRuleset {
        let game_over = if self.config.solo {
            STAGE_GAME_OVER_SOLO_SNAKE
        } else {
            STAGE_GAME_OVER_STANDARD
        };

        let stages: Vec<&str> = match name {
            GAME_TYPE_STANDARD => std::iter::once(game_over)
                .chain(STANDARD_RULESET_STAGES[1..].iter().copied())
                .collect(),
            GAME_TYPE_SOLO => SOLO_RULESET_STAGES.to_vec(),
            _ => vec![game_over],
        };

        info!("Building ruleset '{}' with stages {:?}", name, stages);
        self.pipeline_ruleset(name, Pipeline::from_registry(&self.registry, &stages))
    }

    /// Wraps a custom pipeline with this builder's settings
    pub fn pipeline_ruleset(&self, name: &str, pipeline: Pipeline) -> PipelineRuleset {
        PipelineRuleset::new(name, pipeline, self.settings())
    }
}

impl Default for RulesetBuilder {
    fn default() -> Self {
        RulesetBuilder::new(RulesetConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{
        STAGE_ELIMINATION_STANDARD, STAGE_FEED_SNAKES_STANDARD, STAGE_MOVEMENT_STANDARD,
        STAGE_STARVATION_STANDARD,
    };
    use crate::rng::Rand;
    use crate::settings::PARAM_FOOD_SPAWN_CHANCE;
    use crate::types::{Point, Snake};

    #[test]
    fn test_named_ruleset_names() {
        let builder = RulesetBuilder::default();
        for name in &[GAME_TYPE_STANDARD, GAME_TYPE_SOLO, "custom"] {
            let ruleset = builder.named_ruleset(name);
            assert_eq!(ruleset.name(), *name);
            assert!(ruleset.err().is_none());
        }
    }

    #[test]
    fn test_named_ruleset_stage_lists() {
        let standard = RulesetBuilder::default().named_ruleset(GAME_TYPE_STANDARD);
        assert_eq!(standard.pipeline().stage_names(), STANDARD_RULESET_STAGES.to_vec());

        let solo = RulesetBuilder::default().named_ruleset(GAME_TYPE_SOLO);
        assert_eq!(solo.pipeline().stage_names(), SOLO_RULESET_STAGES.to_vec());

        let custom = RulesetBuilder::default().named_ruleset("wrapped");
        assert_eq!(custom.pipeline().stage_names(), vec![STAGE_GAME_OVER_STANDARD]);

        let custom_solo = RulesetBuilder::new(RulesetConfig::default().with_solo(true)).named_ruleset("wrapped");
        assert_eq!(custom_solo.pipeline().stage_names(), vec![STAGE_GAME_OVER_SOLO_SNAKE]);
    }

    #[test]
    fn test_solo_flag_swaps_standard_game_over() {
        let ruleset = RulesetBuilder::new(RulesetConfig::default().with_solo(true)).named_ruleset(GAME_TYPE_STANDARD);
        assert_eq!(
            ruleset.pipeline().stage_names(),
            vec![
                STAGE_GAME_OVER_SOLO_SNAKE,
                STAGE_MOVEMENT_STANDARD,
                STAGE_STARVATION_STANDARD,
                STAGE_FEED_SNAKES_STANDARD,
                STAGE_ELIMINATION_STANDARD,
            ]
        );

        // One snake left does not end a solo game
        let state = BoardState::new(7, 7).with_snakes(vec![Snake::new("one", vec![Point::new(1, 1)], 100)]);
        let outcome = ruleset.execute(&state, &[]).unwrap();
        assert!(!outcome.game_over);
    }

    #[test]
    fn test_settings_from_params() {
        let builder = RulesetBuilder::new(
            RulesetConfig::default()
                .with_param(PARAM_FOOD_SPAWN_CHANCE, "25")
                .with_seed(99)
                .with_rand(FixedRand::Max),
        );
        let ruleset = builder.named_ruleset(GAME_TYPE_STANDARD);

        assert_eq!(ruleset.settings().int(PARAM_FOOD_SPAWN_CHANCE, 0), 25);
        assert_eq!(ruleset.settings().seed(), 99);
        assert_eq!(ruleset.settings().get_rand(1).intn(10), 9);
    }

    #[test]
    fn test_explicit_settings_win() {
        let explicit = Settings::default().with_param(PARAM_FOOD_SPAWN_CHANCE, "5").with_seed(3);
        let builder = RulesetBuilder::new(
            RulesetConfig::default()
                .with_param(PARAM_FOOD_SPAWN_CHANCE, "25")
                .with_seed(99)
                .with_settings(explicit.clone()),
        );

        assert_eq!(builder.named_ruleset(GAME_TYPE_SOLO).settings(), &explicit);
    }

    #[test]
    fn test_custom_registry_errors_surface() {
        let builder = RulesetBuilder::default().with_registry(StageRegistry::new());
        let ruleset = builder.named_ruleset(GAME_TYPE_STANDARD);
        assert_eq!(ruleset.err(), Some(&RulesError::EmptyRegistry));

        let err = ruleset.execute(&BoardState::new(7, 7), &[]).unwrap_err();
        assert_eq!(err.error, RulesError::EmptyRegistry);
        assert!(err.state.is_none());
    }

    #[test]
    fn test_pipeline_ruleset_uses_given_pipeline() {
        let builder = RulesetBuilder::default();
        let ruleset = builder.pipeline_ruleset("only-movement", Pipeline::new(&[STAGE_MOVEMENT_STANDARD]));
        assert_eq!(ruleset.name(), "only-movement");

        let state = BoardState::new(7, 7)
            .with_turn(3)
            .with_snakes(vec![Snake::new("one", vec![Point::new(1, 1), Point::new(1, 0)], 100)]);
        let outcome = ruleset.execute(&state, &[SnakeMove::new("one", "right")]).unwrap();

        assert!(!outcome.game_over);
        assert_eq!(outcome.state.snakes[0].body, vec![Point::new(2, 1), Point::new(1, 1)]);
        assert_eq!(outcome.state.snakes[0].health, 100);
    }
}
