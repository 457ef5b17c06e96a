// Property tests over randomly generated boards and moves

use proptest::prelude::*;
use snake_rules::pipeline::STAGE_FEED_SNAKES_STANDARD;
use snake_rules::solo::game_over_solo;
use snake_rules::standard::{feed_snakes_standard, game_over_standard};
use snake_rules::types::{GAME_TYPE_STANDARD, SNAKE_MAX_HEALTH};
use snake_rules::{
    BoardState, Pipeline, Point, Ruleset, RulesetBuilder, Settings, Snake, SnakeMove,
};

const MOVES: [&str; 5] = ["up", "down", "left", "right", "sideways"];

fn point(width: i32, height: i32) -> impl Strategy<Value = Point> {
    (0..width, 0..height).prop_map(|(x, y)| Point::new(x, y))
}

fn snake(index: usize, width: i32, height: i32) -> impl Strategy<Value = Snake> {
    (prop::collection::vec(point(width, height), 1..6), 1..=SNAKE_MAX_HEALTH)
        .prop_map(move |(body, health)| Snake::new(index.to_string(), body, health))
}

/// Board with 1-4 live snakes, distinct food points and a turn past initialization
fn board() -> impl Strategy<Value = BoardState> {
    (3..12i32, 3..12i32, 1..5usize).prop_flat_map(|(width, height, count)| {
        let snakes: Vec<_> = (0..count).map(|i| snake(i, width, height)).collect();
        (
            snakes,
            prop::collection::hash_set(point(width, height), 0..6),
            1..500i32,
        )
            .prop_map(move |(snakes, food, turn)| {
                BoardState::new(width, height)
                    .with_turn(turn)
                    .with_food(food.into_iter().collect())
                    .with_snakes(snakes)
            })
    })
}

fn board_and_moves() -> impl Strategy<Value = (BoardState, Vec<SnakeMove>)> {
    board().prop_flat_map(|b| {
        let count = b.snakes.len();
        (Just(b), prop::collection::vec(prop::sample::select(MOVES.to_vec()), count))
    })
    .prop_map(|(b, dirs)| {
        let moves: Vec<SnakeMove> = b
            .snakes
            .iter()
            .zip(dirs)
            .map(|(s, d)| SnakeMove::new(s.id.clone(), d))
            .collect();
        (b, moves)
    })
}

proptest! {
    #[test]
    fn prop_no_live_snakes_share_a_head((state, moves) in board_and_moves()) {
        let ruleset = RulesetBuilder::default().named_ruleset(GAME_TYPE_STANDARD);
        let outcome = ruleset.execute(&state, &moves).unwrap();

        let alive: Vec<&Snake> = outcome.state.snakes.iter().filter(|s| !s.is_eliminated()).collect();
        for (i, a) in alive.iter().enumerate() {
            for b in &alive[i + 1..] {
                prop_assert_ne!(a.body[0], b.body[0], "{} and {} share a head", a.id, b.id);
            }
        }
    }

    #[test]
    fn prop_execute_is_deterministic_and_pure((state, moves) in board_and_moves()) {
        let ruleset = RulesetBuilder::default().named_ruleset(GAME_TYPE_STANDARD);
        let before = state.clone();

        let first = ruleset.execute(&state, &moves).unwrap();
        let second = ruleset.execute(&state, &moves).unwrap();

        prop_assert_eq!(&state, &before);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_game_over_checks_are_idempotent(state in board()) {
        let settings = Settings::default();
        let mut b = state.clone();

        let standard = game_over_standard(&mut b, &settings, &[]).unwrap();
        prop_assert_eq!(game_over_standard(&mut b, &settings, &[]).unwrap(), standard);
        let solo = game_over_solo(&mut b, &settings, &[]).unwrap();
        prop_assert_eq!(game_over_solo(&mut b, &settings, &[]).unwrap(), solo);

        prop_assert_eq!(b, state);
    }

    #[test]
    fn prop_feeding_grows_by_one_and_restores_health(state in board()) {
        let mut b = state.clone();
        feed_snakes_standard(&mut b, &Settings::default(), &[]).unwrap();

        for (before, after) in state.snakes.iter().zip(&b.snakes) {
            if state.food.contains(&before.body[0]) {
                prop_assert_eq!(after.body.len(), before.body.len() + 1);
                prop_assert_eq!(after.health, SNAKE_MAX_HEALTH);
                prop_assert!(!b.food.contains(&before.body[0]));
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn prop_single_stage_pipeline_matches_stage(state in board()) {
        let mut expected = state.clone();
        feed_snakes_standard(&mut expected, &Settings::default(), &[]).unwrap();

        let outcome = Pipeline::new(&[STAGE_FEED_SNAKES_STANDARD])
            .execute(&state, &Settings::default(), &[])
            .unwrap();
        prop_assert!(!outcome.game_over);
        prop_assert_eq!(outcome.state, expected);
    }
}
