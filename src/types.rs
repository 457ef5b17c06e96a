// Core game types shared by every stage, map and ruleset
// See https://docs.battlesnake.com/guides/game/rules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Health a snake starts with and is restored to after eating
pub const SNAKE_MAX_HEALTH: i32 = 100;
/// Number of stacked segments a freshly placed snake starts with
pub const SNAKE_START_SIZE: usize = 3;

pub const BOARD_SIZE_SMALL: i32 = 7;
pub const BOARD_SIZE_MEDIUM: i32 = 11;
pub const BOARD_SIZE_LARGE: i32 = 19;
pub const BOARD_SIZE_XLARGE: i32 = 21;
pub const BOARD_SIZE_XXLARGE: i32 = 25;

pub const GAME_TYPE_STANDARD: &str = "standard";
pub const GAME_TYPE_SOLO: &str = "solo";

/// 2D coordinate on the board, (0, 0) is the bottom-left corner
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Represents the four possible movement directions for a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to its move string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next point when moving in this direction
    pub fn apply(&self, point: &Point) -> Point {
        match self {
            Direction::Up => Point { x: point.x, y: point.y + 1 },
            Direction::Down => Point { x: point.x, y: point.y - 1 },
            Direction::Left => Point { x: point.x - 1, y: point.y },
            Direction::Right => Point { x: point.x + 1, y: point.y },
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a snake left the game
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EliminationCause {
    #[default]
    #[serde(rename = "")]
    NotEliminated,
    #[serde(rename = "snake-collision")]
    Collision,
    #[serde(rename = "snake-self-collision")]
    SelfCollision,
    #[serde(rename = "head-collision")]
    HeadToHeadCollision,
    #[serde(rename = "wall-collision")]
    OutOfBounds,
    #[serde(rename = "out-of-health")]
    OutOfHealth,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Snake {
    pub id: String,
    /// Head first; repeated points are stacked segments
    pub body: Vec<Point>,
    pub health: i32,
    #[serde(default)]
    pub eliminated_cause: EliminationCause,
    #[serde(default)]
    pub eliminated_by: String,
    #[serde(default)]
    pub eliminated_on_turn: i32,
}

impl Snake {
    pub fn new(id: impl Into<String>, body: Vec<Point>, health: i32) -> Self {
        Snake {
            id: id.into(),
            body,
            health,
            ..Snake::default()
        }
    }

    pub fn head(&self) -> Option<Point> {
        self.body.first().copied()
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated_cause != EliminationCause::NotEliminated
    }

    /// Marks the snake as eliminated. Body and health are left untouched.
    pub fn eliminate(&mut self, cause: EliminationCause, by: impl Into<String>, turn: i32) {
        self.eliminated_cause = cause;
        self.eliminated_by = by.into();
        self.eliminated_on_turn = turn;
    }
}

/// Complete per-turn world snapshot
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    #[serde(default)]
    pub turn: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub food: Vec<Point>,
    #[serde(default)]
    pub snakes: Vec<Snake>,
}

impl BoardState {
    /// Creates an empty board at turn zero
    pub fn new(width: i32, height: i32) -> Self {
        BoardState {
            width,
            height,
            ..BoardState::default()
        }
    }

    pub fn with_turn(mut self, turn: i32) -> Self {
        self.turn = turn;
        self
    }

    pub fn with_food(mut self, food: Vec<Point>) -> Self {
        self.food = food;
        self
    }

    pub fn with_snakes(mut self, snakes: Vec<Snake>) -> Self {
        self.snakes = snakes;
        self
    }

    /// Number of snakes that have not been eliminated
    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|s| !s.is_eliminated()).count()
    }

    pub fn is_on_board(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }
}

/// A single snake's requested move for one turn
///
/// Any move string other than "up", "down", "left" or "right" asks the
/// movement stage to pick a default move for that snake.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SnakeMove {
    pub id: String,
    #[serde(rename = "move")]
    pub direction: String,
}

impl SnakeMove {
    pub fn new(id: impl Into<String>, direction: impl Into<String>) -> Self {
        SnakeMove {
            id: id.into(),
            direction: direction.into(),
        }
    }

    /// Parsed direction, `None` when the move string is not a valid direction
    pub fn parsed(&self) -> Option<Direction> {
        self.direction.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trips_through_strings() {
        for dir in Direction::all() {
            assert_eq!(dir.as_str().parse::<Direction>().unwrap(), dir);
        }
        assert!("UP".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_apply() {
        let p = Point::new(3, 3);
        assert_eq!(Direction::Up.apply(&p), Point::new(3, 4));
        assert_eq!(Direction::Down.apply(&p), Point::new(3, 2));
        assert_eq!(Direction::Left.apply(&p), Point::new(2, 3));
        assert_eq!(Direction::Right.apply(&p), Point::new(4, 3));
    }

    #[test]
    fn test_snake_move_parsed() {
        assert_eq!(SnakeMove::new("a", "left").parsed(), Some(Direction::Left));
        assert_eq!(SnakeMove::new("a", "mocked").parsed(), None);
    }

    #[test]
    fn test_eliminate_keeps_body_and_health() {
        let mut snake = Snake::new("one", vec![Point::new(1, 1), Point::new(1, 2)], 42);
        snake.eliminate(EliminationCause::OutOfBounds, "", 7);

        assert!(snake.is_eliminated());
        assert_eq!(snake.body, vec![Point::new(1, 1), Point::new(1, 2)]);
        assert_eq!(snake.health, 42);
        assert_eq!(snake.eliminated_on_turn, 7);
        assert_eq!(snake.eliminated_by, "");
    }

    #[test]
    fn test_is_on_board() {
        let b = BoardState::new(10, 100);
        assert!(b.is_on_board(Point::new(0, 0)));
        assert!(b.is_on_board(Point::new(9, 99)));
        assert!(!b.is_on_board(Point::new(10, 9)));
        assert!(!b.is_on_board(Point::new(9, 100)));
        assert!(!b.is_on_board(Point::new(-1, 0)));
        assert!(!b.is_on_board(Point::new(0, i32::MIN)));
    }
}
