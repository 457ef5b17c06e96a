// Game maps: board setup and per-turn board updates around the pipeline
//
// A map never touches a board directly. It reads the previous state and
// describes its changes through an Editor, which the helpers at the bottom
// of this file apply to a copy.

use log::{debug, info};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::board::{choose_random_points, create_default_board_state, get_unoccupied_points, initialize_snakes};
use crate::error::RulesError;
use crate::rng::Rand;
use crate::settings::{Settings, PARAM_FOOD_SPAWN_CHANCE};
use crate::types::{BoardState, Point, Snake, BOARD_SIZE_SMALL, BOARD_SIZE_XXLARGE};

/// Write access a map gets to the board it is shaping
pub trait Editor {
    fn add_food(&mut self, p: Point);

    /// Sets body and health of snake `id`, adding the snake if it isn't on the board
    fn place_snake(&mut self, id: &str, body: Vec<Point>, health: i32);
}

/// Editor that applies every change straight to an owned board
#[derive(Debug, Clone)]
pub struct BoardStateEditor {
    state: BoardState,
}

impl BoardStateEditor {
    pub fn new(state: BoardState) -> Self {
        BoardStateEditor { state }
    }

    pub fn food(&self) -> &[Point] {
        &self.state.food
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn into_state(self) -> BoardState {
        self.state
    }
}

impl Editor for BoardStateEditor {
    fn add_food(&mut self, p: Point) {
        self.state.food.push(p);
    }

    fn place_snake(&mut self, id: &str, body: Vec<Point>, health: i32) {
        match self.state.snakes.iter_mut().find(|s| s.id == id) {
            Some(snake) => {
                snake.body = body;
                snake.health = health;
            }
            None => self.state.snakes.push(Snake::new(id, body, health)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Square boards of every odd size between `min` and `max` inclusive
pub fn odd_sizes(min: u32, max: u32) -> Vec<Dimensions> {
    (min..=max)
        .filter(|size| size % 2 == 1)
        .map(|size| Dimensions { width: size, height: size })
        .collect()
}

/// Descriptive information about a map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapMetadata {
    pub name: String,
    pub min_players: u32,
    pub max_players: u32,
    pub board_sizes: Vec<Dimensions>,
}

/// Pluggable board setup and update strategy
pub trait GameMap: Send + Sync {
    fn id(&self) -> &str;

    fn meta(&self) -> MapMetadata;

    /// Places the starting snakes and food
    fn setup_board(
        &self,
        initial: &BoardState,
        settings: &Settings,
        editor: &mut dyn Editor,
    ) -> Result<(), RulesError>;

    /// Runs before the pipeline each turn
    fn pre_update_board(
        &self,
        last: &BoardState,
        settings: &Settings,
        editor: &mut dyn Editor,
    ) -> Result<(), RulesError>;

    /// Runs after the pipeline each turn
    fn post_update_board(
        &self,
        last: &BoardState,
        settings: &Settings,
        editor: &mut dyn Editor,
    ) -> Result<(), RulesError>;
}

/// Default map: fixed or random starts and a chance of one new food per turn
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMap;

impl StandardMap {
    pub const ID: &'static str = "standard";
    const MAX_PLAYERS: u32 = 16;
}

impl GameMap for StandardMap {
    fn id(&self) -> &str {
        Self::ID
    }

    fn meta(&self) -> MapMetadata {
        MapMetadata {
            name: "Standard".to_string(),
            min_players: 1,
            max_players: Self::MAX_PLAYERS,
            board_sizes: odd_sizes(BOARD_SIZE_SMALL as u32, BOARD_SIZE_XXLARGE as u32),
        }
    }

    fn setup_board(
        &self,
        initial: &BoardState,
        settings: &Settings,
        editor: &mut dyn Editor,
    ) -> Result<(), RulesError> {
        let mut rand = settings.get_rand(0);

        if initial.snakes.len() > Self::MAX_PLAYERS as usize {
            return Err(RulesError::TooManySnakes);
        }

        let snake_ids: Vec<&str> = initial.snakes.iter().map(|s| s.id.as_str()).collect();
        let board = create_default_board_state(&mut rand, initial.width, initial.height, &snake_ids)?;

        for food in board.food {
            editor.add_food(food);
        }
        for snake in board.snakes {
            editor.place_snake(&snake.id, snake.body, snake.health);
        }
        Ok(())
    }

    fn pre_update_board(
        &self,
        _last: &BoardState,
        _settings: &Settings,
        _editor: &mut dyn Editor,
    ) -> Result<(), RulesError> {
        Ok(())
    }

    fn post_update_board(
        &self,
        last: &BoardState,
        settings: &Settings,
        editor: &mut dyn Editor,
    ) -> Result<(), RulesError> {
        let mut rand = settings.get_rand(last.turn);

        let spawn_chance = settings.int(PARAM_FOOD_SPAWN_CHANCE, 0);
        if !should_spawn_food(&mut rand, spawn_chance) {
            return Ok(());
        }

        for p in choose_random_points(&mut rand, 1, get_unoccupied_points(last, false)) {
            debug!("Turn {}: spawning food at ({}, {})", last.turn, p.x, p.y);
            editor.add_food(p);
        }
        Ok(())
    }
}

/// Rolls the per-turn food spawn against a percent chance
fn should_spawn_food<R: Rand>(rand: &mut R, spawn_chance: i32) -> bool {
    if spawn_chance <= 0 {
        return false;
    }
    let roll = 100 - rand.intn(100) as i32;
    roll < spawn_chance
}

/// Maps available to a game, looked up by id
#[derive(Clone, Default)]
pub struct MapRegistry {
    maps: HashMap<String, Arc<dyn GameMap>>,
}

impl MapRegistry {
    pub fn new() -> Self {
        MapRegistry::default()
    }

    /// Registry holding the standard map
    pub fn standard() -> Self {
        let mut registry = MapRegistry::new();
        registry.register(StandardMap);
        registry
    }

    /// Adds a map under its own id, replacing any map with that id
    pub fn register<M: GameMap + 'static>(&mut self, map: M) {
        self.maps.insert(map.id().to_string(), Arc::new(map));
    }

    pub fn get_map(&self, id: &str) -> Result<Arc<dyn GameMap>, RulesError> {
        self.maps
            .get(id)
            .cloned()
            .ok_or_else(|| RulesError::MapNotFound(id.to_string()))
    }
}

impl fmt::Debug for MapRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.maps.keys().collect();
        ids.sort();
        f.debug_struct("MapRegistry").field("maps", &ids).finish()
    }
}

/// Creates the turn-zero board for a game on map `map_id`
pub fn setup_board<S: AsRef<str>>(
    registry: &MapRegistry,
    map_id: &str,
    settings: &Settings,
    width: i32,
    height: i32,
    snake_ids: &[S],
) -> Result<BoardState, RulesError> {
    let map = registry.get_map(map_id)?;

    let mut initial = BoardState::new(width, height);
    initialize_snakes(&mut initial, snake_ids);

    let mut editor = BoardStateEditor::new(initial.clone());
    map.setup_board(&initial, settings, &mut editor)?;

    info!(
        "Set up {}x{} board on map '{}' with {} snakes",
        width,
        height,
        map_id,
        snake_ids.len()
    );
    Ok(editor.into_state())
}

/// Runs a map's pre-update hook against a copy of `state`
pub fn pre_update_board(
    map: &dyn GameMap,
    state: &BoardState,
    settings: &Settings,
) -> Result<BoardState, RulesError> {
    let mut editor = BoardStateEditor::new(state.clone());
    map.pre_update_board(state, settings, &mut editor)?;
    Ok(editor.into_state())
}

/// Runs a map's post-update hook against a copy of `state`
pub fn post_update_board(
    map: &dyn GameMap,
    state: &BoardState,
    settings: &Settings,
) -> Result<BoardState, RulesError> {
    let mut editor = BoardStateEditor::new(state.clone());
    map.post_update_board(state, settings, &mut editor)?;
    Ok(editor.into_state())
}
