// Standard ruleset stages
//
// Movement, starvation, feeding, elimination and the standard game-over check.
// Every stage skips eliminated snakes; their bodies and health stay frozen.

use log::debug;

use crate::error::RulesError;
use crate::pipeline::{
    is_initialization, STAGE_ELIMINATION_STANDARD, STAGE_FEED_SNAKES_STANDARD,
    STAGE_GAME_OVER_STANDARD, STAGE_MOVEMENT_STANDARD, STAGE_STARVATION_STANDARD,
};
use crate::settings::Settings;
use crate::types::{BoardState, Direction, EliminationCause, Point, Snake, SnakeMove, SNAKE_MAX_HEALTH};

pub const STANDARD_RULESET_STAGES: [&str; 5] = [
    STAGE_GAME_OVER_STANDARD,
    STAGE_MOVEMENT_STANDARD,
    STAGE_STARVATION_STANDARD,
    STAGE_FEED_SNAKES_STANDARD,
    STAGE_ELIMINATION_STANDARD,
];

/// Moves every live snake one square
///
/// All snakes are validated before any of them moves, so a missing move or an
/// empty body leaves the board untouched.
pub fn move_snakes_standard(
    b: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialization(b, settings, moves) || moves.is_empty() {
        return Ok(false);
    }

    for snake in b.snakes.iter().filter(|s| !s.is_eliminated()) {
        if snake.body.is_empty() {
            return Err(RulesError::ZeroLengthSnake(snake.id.clone()));
        }
        if !moves.iter().any(|m| m.id == snake.id) {
            return Err(RulesError::NoMoveFound(snake.id.clone()));
        }
    }

    let turn = b.turn;
    for snake in b.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
        let requested = match moves.iter().find(|m| m.id == snake.id) {
            Some(m) => m,
            None => continue,
        };

        let direction = match requested.parsed() {
            Some(direction) => direction,
            None => {
                let fallback = default_move(&snake.body);
                debug!(
                    "Turn {}: snake {} sent '{}', defaulting to {}",
                    turn, snake.id, requested.direction, fallback
                );
                fallback
            }
        };

        let new_head = direction.apply(&snake.body[0]);
        snake.body.pop();
        snake.body.insert(0, new_head);
    }

    Ok(false)
}

/// Keeps going the way the snake was already heading, or up when that can't be told
pub fn default_move(body: &[Point]) -> Direction {
    if body.len() >= 2 {
        let (head, neck) = (body[0], body[1]);

        // Neck next to head
        if head.x == neck.x + 1 {
            return Direction::Right;
        } else if head.x == neck.x - 1 {
            return Direction::Left;
        } else if head.y == neck.y + 1 {
            return Direction::Up;
        } else if head.y == neck.y - 1 {
            return Direction::Down;
        }

        // Wrapped across an edge, anchored on the zero axis
        if head.x == 0 && neck.x > 0 {
            return Direction::Right;
        } else if neck.x == 0 && head.x > 0 {
            return Direction::Left;
        } else if head.y == 0 && neck.y > 0 {
            return Direction::Up;
        } else if neck.y == 0 && head.y > 0 {
            return Direction::Down;
        }
    }
    Direction::Up
}

/// Takes one point of health from every live snake, without a floor
pub fn reduce_snake_health_standard(
    b: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialization(b, settings, moves) {
        return Ok(false);
    }
    for snake in b.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
        snake.health -= 1;
    }
    Ok(false)
}

/// Feeds every live snake whose head is on food and removes eaten food
///
/// Several snakes can eat the same food on the same turn. Runs on turn zero
/// too, so food placed next to a spawn can be eaten immediately.
pub fn feed_snakes_standard(
    b: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    let food = std::mem::take(&mut b.food);
    let mut remaining = Vec::with_capacity(food.len());

    for point in food {
        let mut eaten = false;
        for snake in b.snakes.iter_mut() {
            if snake.is_eliminated() || snake.body.is_empty() {
                continue;
            }
            if snake.body[0] == point {
                feed_snake(snake);
                eaten = true;
            }
        }
        if !eaten {
            remaining.push(point);
        }
    }

    b.food = remaining;
    Ok(false)
}

fn feed_snake(snake: &mut Snake) {
    grow_snake(snake);
    snake.health = SNAKE_MAX_HEALTH;
}

fn grow_snake(snake: &mut Snake) {
    if let Some(&tail) = snake.body.last() {
        snake.body.push(tail);
    }
}

struct CollisionElimination {
    index: usize,
    cause: EliminationCause,
    by: String,
}

/// Eliminates snakes that starved, left the board or collided this turn
///
/// Starvation and bounds are marked first. Collisions are then judged against
/// the remaining snakes and applied together, so one snake's collision never
/// changes another snake's outcome in the same turn. When several snakes could
/// take the blame, the longest one does.
pub fn eliminate_snakes_standard(
    b: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialization(b, settings, moves) {
        return Ok(false);
    }

    // Stable sort keeps list order between equal lengths
    let mut indices_by_length: Vec<usize> = (0..b.snakes.len()).collect();
    indices_by_length.sort_by(|&i, &j| b.snakes[j].body.len().cmp(&b.snakes[i].body.len()));

    let turn = b.turn;
    let eliminated_on_turn = turn + 1;
    let (width, height) = (b.width, b.height);

    for snake in b.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
        if snake.body.is_empty() {
            return Err(RulesError::ZeroLengthSnake(snake.id.clone()));
        }

        if snake_is_out_of_health(snake) {
            debug!("Turn {}: snake {} ran out of health", turn, snake.id);
            snake.eliminate(EliminationCause::OutOfHealth, "", eliminated_on_turn);
        } else if snake_is_out_of_bounds(snake, width, height) {
            debug!("Turn {}: snake {} left the board", turn, snake.id);
            snake.eliminate(EliminationCause::OutOfBounds, "", eliminated_on_turn);
        }
    }

    let snakes = &b.snakes;
    let mut collisions = Vec::new();
    for (index, snake) in snakes.iter().enumerate() {
        if snake.is_eliminated() {
            continue;
        }

        if snake_has_body_collided(snake, snake) {
            collisions.push(CollisionElimination {
                index,
                cause: EliminationCause::SelfCollision,
                by: snake.id.clone(),
            });
            continue;
        }

        let mut longest_alive_others = indices_by_length
            .iter()
            .map(|&i| &snakes[i])
            .filter(|other| !other.is_eliminated() && other.id != snake.id);

        if let Some(other) = longest_alive_others
            .clone()
            .find(|other| snake_has_body_collided(snake, other))
        {
            collisions.push(CollisionElimination {
                index,
                cause: EliminationCause::Collision,
                by: other.id.clone(),
            });
            continue;
        }

        if let Some(other) =
            longest_alive_others.find(|other| snake_has_lost_head_to_head(snake, other))
        {
            collisions.push(CollisionElimination {
                index,
                cause: EliminationCause::HeadToHeadCollision,
                by: other.id.clone(),
            });
        }
    }

    for elimination in collisions {
        let snake = &mut b.snakes[elimination.index];
        debug!(
            "Turn {}: snake {} eliminated by {:?} (blamed on '{}')",
            turn, snake.id, elimination.cause, elimination.by
        );
        snake.eliminate(elimination.cause, elimination.by, eliminated_on_turn);
    }

    Ok(false)
}

pub(crate) fn snake_is_out_of_health(s: &Snake) -> bool {
    s.health <= 0
}

pub(crate) fn snake_is_out_of_bounds(s: &Snake, board_width: i32, board_height: i32) -> bool {
    s.body
        .iter()
        .any(|p| p.x < 0 || p.x >= board_width || p.y < 0 || p.y >= board_height)
}

/// True when `s`'s head lies on any non-head segment of `other`
pub(crate) fn snake_has_body_collided(s: &Snake, other: &Snake) -> bool {
    match s.body.first() {
        Some(head) => other.body.iter().skip(1).any(|p| p == head),
        None => false,
    }
}

/// True when the heads meet and `s` is not longer than `other`
pub(crate) fn snake_has_lost_head_to_head(s: &Snake, other: &Snake) -> bool {
    match (s.body.first(), other.body.first()) {
        (Some(a), Some(b)) if a == b => s.body.len() <= other.body.len(),
        _ => false,
    }
}

/// Game ends when one or no snakes are left
pub fn game_over_standard(
    b: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    Ok(b.alive_count() <= 1)
}
