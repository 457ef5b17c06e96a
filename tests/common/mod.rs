// Shared helpers for integration tests
//
// Scenario fixtures live in tests/fixtures as JSON arrays of GameTestCase.

#![allow(dead_code)]

use serde::Deserialize;
use snake_rules::{BoardState, Ruleset, SnakeMove};
use std::fs;
use std::path::PathBuf;

/// Helper function to get the path to test fixtures
pub fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

/// Routes `log` output through the test harness; set RUST_LOG to see it
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One turn: a starting board, the moves sent, and what should come out
#[derive(Debug, Deserialize)]
pub struct GameTestCase {
    pub name: String,
    pub prev_state: BoardState,
    pub moves: Vec<SnakeMove>,
    /// Display text of the expected error
    #[serde(default)]
    pub expected_error: Option<String>,
    #[serde(default)]
    pub expected_state: Option<BoardState>,
}

pub fn load_cases(filename: &str) -> Vec<GameTestCase> {
    let path = fixture_path(filename);
    let contents = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

impl GameTestCase {
    /// Runs the turn and checks the error or the resulting board
    pub fn require_valid_next_state(&self, ruleset: &dyn Ruleset) {
        let prev = self.prev_state.clone();
        let result = ruleset.execute(&prev, &self.moves);
        assert_eq!(prev, self.prev_state, "{}: input state was mutated", self.name);

        match (&self.expected_error, result) {
            (Some(expected), Err(err)) => {
                assert_eq!(&err.to_string(), expected, "{}: wrong error", self.name);
            }
            (Some(expected), Ok(outcome)) => {
                panic!("{}: expected error '{}', got {:?}", self.name, expected, outcome)
            }
            (None, Err(err)) => panic!("{}: unexpected error {}", self.name, err),
            (None, Ok(outcome)) => {
                if let Some(expected) = &self.expected_state {
                    let next = outcome.state;
                    assert_eq!(next.width, expected.width, "{}: width", self.name);
                    assert_eq!(next.height, expected.height, "{}: height", self.name);
                    assert_eq!(next.food, expected.food, "{}: food", self.name);
                    assert_eq!(next.snakes, expected.snakes, "{}: snakes", self.name);
                }
            }
        }
    }
}
