use crate::log;
use super::error::ArenaError;
use super::rng::SessionRng;
use super::snake::Snake;
use super::state::State;
use super::types::{DeathReason, Direction, Position};

/// What happened during a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Indices of the snakes that consumed the point item.
    pub eaten: Vec<usize>,
    pub deaths: Vec<(usize, DeathReason)>,
    pub game_over: bool,
}

/// The simulation. Owns the only mutable `State`; callers get copies.
pub struct Arena {
    state: State,
    rng: SessionRng,
}

impl Arena {
    pub fn new(width: i32, height: i32, rng: SessionRng) -> Self {
        if width <= 0 || height <= 0 {
            panic!("Arena size must be positive, got {}x{}", width, height);
        }
        if width.checked_mul(height).is_none() {
            panic!("Arena of {}x{} cells is too large", width, height);
        }

        let mut arena = Self {
            state: State::new(width, height),
            rng,
        };
        arena.respawn_point_item();
        arena
    }

    pub fn with_seed(width: i32, height: i32, seed: u64) -> Self {
        Self::new(width, height, SessionRng::new(seed))
    }

    pub fn from_random(width: i32, height: i32) -> Self {
        Self::new(width, height, SessionRng::from_random())
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn state(&self) -> State {
        self.state.clone()
    }

    pub fn is_over(&self) -> bool {
        self.state.game_is_over
    }

    pub fn snake_count(&self) -> usize {
        self.state.snakes.len()
    }

    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.state.game_is_over {
            outcome.game_over = true;
            return outcome;
        }

        for index in 0..self.state.snakes.len() {
            if self.state.game_is_over {
                break;
            }
            if !self.state.snakes[index].is_alive() {
                continue;
            }

            let snake = &mut self.state.snakes[index];
            snake.extrude();
            let head = snake.head();
            if head == self.state.point_item {
                outcome.eaten.push(index);
                log!("Snake {} ate the point item at {}", index, head);
                self.respawn_point_item();
            } else {
                snake.contract();
            }

            if let Some(reason) = self.check_collision(index) {
                self.state.snakes[index].kill(reason);
                outcome.deaths.push((index, reason));
                log!("Snake {} {} at {}", index, reason, head);
            }
        }

        if !self.state.snakes.is_empty() && self.state.alive_count() == 0 {
            self.end_game();
        }

        outcome.game_over = self.state.game_is_over;
        outcome
    }

    /// Reversals and turns of dead snakes are silently dropped.
    pub fn set_snake_heading(
        &mut self,
        index: usize,
        direction: Direction,
    ) -> Result<(), ArenaError> {
        let snake = self
            .state
            .snakes
            .get_mut(index)
            .ok_or(ArenaError::InvalidSnakeIndex(index))?;

        if snake.is_alive() && !direction.is_opposite(&snake.heading) {
            snake.heading = direction;
        }
        Ok(())
    }

    /// Places a new snake with its head at `(x, y)` and returns its index.
    pub fn add_snake(
        &mut self,
        x: i32,
        y: i32,
        length: usize,
        heading: Direction,
    ) -> Result<usize, ArenaError> {
        let head = Position::new(x, y);
        if !trail_fits(head, length, heading) {
            return Err(ArenaError::InvalidLength(length));
        }

        if !self.state.is_inside(head) {
            return Err(ArenaError::OutOfBounds(head));
        }
        if self.state.is_obstacle(head) {
            return Err(ArenaError::CellOccupied(head));
        }

        let snake = Snake::new(head, length, heading);
        let heads: Vec<Position> = self.state.snakes.iter().map(Snake::head).collect();
        if let Some(segment) = snake.segments.iter().find(|s| heads.contains(s)) {
            return Err(ArenaError::OverlapsHead(*segment));
        }

        let covers_point_item = snake.occupies(self.state.point_item);
        self.state.snakes.push(snake);
        let index = self.state.snakes.len() - 1;
        log!("Snake {} added at {} heading {}, length {}", index, head, heading, length);

        if covers_point_item && !self.state.game_is_over {
            self.respawn_point_item();
        }

        Ok(index)
    }

    fn check_collision(&self, index: usize) -> Option<DeathReason> {
        let snake = &self.state.snakes[index];
        let head = snake.head();

        if snake.body().contains(&head) {
            return Some(DeathReason::SelfCollision);
        }

        let hit_other = self
            .state
            .snakes
            .iter()
            .enumerate()
            .any(|(other_index, other)| other_index != index && other.occupies(head));
        if hit_other {
            return Some(DeathReason::OtherSnakeCollision);
        }

        if !self.state.is_inside(head) {
            return Some(DeathReason::WallCollision);
        }

        None
    }

    fn respawn_point_item(&mut self) {
        let free_cells = self.state.free_cells();
        match self.rng.choose(&free_cells) {
            Some(&position) => self.state.point_item = position,
            None => {
                log!("No free cell left for the point item");
                self.end_game();
            }
        }
    }

    fn end_game(&mut self) {
        if !self.state.game_is_over {
            self.state.game_is_over = true;
            log!("Game over");
        }
    }
}

/// Whether `length` segments trailing behind `head` stay within `i32` coordinates.
fn trail_fits(head: Position, length: usize, heading: Direction) -> bool {
    let Ok(length) = i32::try_from(length) else {
        return false;
    };
    if length == 0 {
        return false;
    }
    let (dx, dy) = heading.opposite().delta();
    head.x.checked_add(dx * (length - 1)).is_some()
        && head.y.checked_add(dy * (length - 1)).is_some()
}
