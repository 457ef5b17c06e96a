// Board creation and placement helpers
//
// Used by maps to build the turn-zero board: where snakes start and where the
// first food goes. Known square sizes (7, 11, 19) get a fixed, fair layout;
// anything else is placed randomly.

use std::collections::HashSet;

use crate::error::RulesError;
use crate::rng::Rand;
use crate::types::{
    BoardState, Point, Snake, BOARD_SIZE_LARGE, BOARD_SIZE_MEDIUM, BOARD_SIZE_SMALL,
    SNAKE_MAX_HEALTH, SNAKE_START_SIZE,
};

/// Builds a fresh board with snakes and food placed automatically
pub fn create_default_board_state<R: Rand, S: AsRef<str>>(
    rand: &mut R,
    width: i32,
    height: i32,
    snake_ids: &[S],
) -> Result<BoardState, RulesError> {
    let mut board = BoardState::new(width, height);
    initialize_snakes(&mut board, snake_ids);
    place_snakes_automatically(rand, &mut board)?;
    place_food_automatically(rand, &mut board)?;
    Ok(board)
}

/// Replaces the board's snakes with bodiless, full-health snakes for each id
pub fn initialize_snakes<S: AsRef<str>>(board: &mut BoardState, snake_ids: &[S]) {
    board.snakes = snake_ids
        .iter()
        .map(|id| Snake::new(id.as_ref(), Vec::new(), SNAKE_MAX_HEALTH))
        .collect();
}

/// Square boards with a hand-tuned starting layout
pub fn is_known_board_size(board: &BoardState) -> bool {
    board.width == board.height
        && matches!(board.width, BOARD_SIZE_SMALL | BOARD_SIZE_MEDIUM | BOARD_SIZE_LARGE)
}

pub fn place_snakes_automatically<R: Rand>(
    rand: &mut R,
    board: &mut BoardState,
) -> Result<(), RulesError> {
    if is_known_board_size(board) {
        place_snakes_fixed(rand, board)
    } else {
        place_snakes_randomly(rand, board)
    }
}

/// Places snakes on the eight fixed start points of a known board size
pub fn place_snakes_fixed<R: Rand>(rand: &mut R, board: &mut BoardState) -> Result<(), RulesError> {
    let (mn, md, mx) = (1, (board.width - 1) / 2, board.width - 2);
    let mut corners = vec![
        Point::new(mn, mn),
        Point::new(mn, mx),
        Point::new(mx, mn),
        Point::new(mx, mx),
    ];
    let mut cardinals = vec![
        Point::new(mn, md),
        Point::new(md, mn),
        Point::new(md, mx),
        Point::new(mx, md),
    ];

    if board.snakes.len() > corners.len() + cardinals.len() {
        return Err(RulesError::TooManySnakes);
    }

    rand.shuffle(&mut corners);
    rand.shuffle(&mut cardinals);

    let start_points: Vec<Point> = if rand.intn(2) == 0 {
        corners.into_iter().chain(cardinals).collect()
    } else {
        cardinals.into_iter().chain(corners).collect()
    };

    for (snake, start) in board.snakes.iter_mut().zip(start_points) {
        snake.body = vec![start; SNAKE_START_SIZE];
    }
    Ok(())
}

/// Places each snake on a random free point with even x and y
pub fn place_snakes_randomly<R: Rand>(
    rand: &mut R,
    board: &mut BoardState,
) -> Result<(), RulesError> {
    for i in 0..board.snakes.len() {
        let candidates: Vec<Point> = get_unoccupied_points(board, false)
            .into_iter()
            .filter(|p| p.x % 2 == 0 && p.y % 2 == 0)
            .collect();
        if candidates.is_empty() {
            return Err(RulesError::NoRoomForSnake);
        }

        let start = candidates[rand.intn(candidates.len())];
        board.snakes[i].body = vec![start; SNAKE_START_SIZE];
    }
    Ok(())
}

pub fn place_food_automatically<R: Rand>(
    rand: &mut R,
    board: &mut BoardState,
) -> Result<(), RulesError> {
    if is_known_board_size(board) {
        place_food_fixed(rand, board)
    } else {
        let n = board.snakes.len();
        place_food_randomly(rand, board, n);
        Ok(())
    }
}

/// Places one food two moves from each snake, pointing away from the centre,
/// then one food in the centre.
pub fn place_food_fixed<R: Rand>(rand: &mut R, board: &mut BoardState) -> Result<(), RulesError> {
    let center = Point::new((board.width - 1) / 2, (board.height - 1) / 2);
    let is_small_board = board.width * board.height < BOARD_SIZE_MEDIUM * BOARD_SIZE_MEDIUM;

    // Only four snakes fit food around them on small boards
    if board.snakes.len() <= 4 || !is_small_board {
        let heads: Vec<Point> = board.snakes.iter().filter_map(Snake::head).collect();
        for head in heads {
            let available: Vec<Point> = [
                Point::new(head.x - 1, head.y - 1),
                Point::new(head.x - 1, head.y + 1),
                Point::new(head.x + 1, head.y - 1),
                Point::new(head.x + 1, head.y + 1),
            ]
            .iter()
            .copied()
            .filter(|&p| {
                p != center
                    && board.is_on_board(p)
                    && !board.food.contains(&p)
                    && is_away_from_center(p, head, center)
                    && !is_corner(board, p)
            })
            .collect();

            if available.is_empty() {
                return Err(RulesError::NoRoomForFood);
            }
            board.food.push(available[rand.intn(available.len())]);
        }
    }

    if !get_unoccupied_points(board, true).contains(&center) {
        return Err(RulesError::NoRoomForFood);
    }
    board.food.push(center);
    Ok(())
}

/// Food must be further from the centre than the head on at least one axis
fn is_away_from_center(p: Point, head: Point, center: Point) -> bool {
    (p.x < head.x && head.x < center.x)
        || (center.x < head.x && head.x < p.x)
        || (p.y < head.y && head.y < center.y)
        || (center.y < head.y && head.y < p.y)
}

fn is_corner(board: &BoardState, p: Point) -> bool {
    (p.x == 0 || p.x == board.width - 1) && (p.y == 0 || p.y == board.height - 1)
}

/// Adds up to `n` food items on random unoccupied points
pub fn place_food_randomly<R: Rand>(rand: &mut R, board: &mut BoardState, n: usize) {
    let unoccupied = get_unoccupied_points(board, false);
    let chosen = choose_random_points(rand, n, unoccupied);
    board.food.extend(chosen);
}

/// Picks up to `n` distinct points from `positions` in random order
pub fn choose_random_points<R: Rand>(rand: &mut R, n: usize, mut positions: Vec<Point>) -> Vec<Point> {
    rand.shuffle(&mut positions);
    positions.truncate(n);
    positions
}

/// All on-board points not covered by food or a live snake
///
/// When `include_possible_moves` is false the points a live head could move
/// into next turn are treated as occupied too.
pub fn get_unoccupied_points(board: &BoardState, include_possible_moves: bool) -> Vec<Point> {
    let mut occupied: HashSet<Point> = board.food.iter().copied().collect();

    for snake in board.snakes.iter().filter(|s| !s.is_eliminated()) {
        occupied.extend(snake.body.iter().copied());
        if !include_possible_moves {
            if let Some(head) = snake.head() {
                occupied.extend([
                    Point::new(head.x - 1, head.y),
                    Point::new(head.x + 1, head.y),
                    Point::new(head.x, head.y - 1),
                    Point::new(head.x, head.y + 1),
                ]);
            }
        }
    }

    let mut unoccupied = Vec::new();
    for x in 0..board.width {
        for y in 0..board.height {
            let p = Point::new(x, y);
            if !occupied.contains(&p) {
                unoccupied.push(p);
            }
        }
    }
    unoccupied
}
