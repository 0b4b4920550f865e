use super::snake::Snake;
use super::types::Position;

/// Snapshot of an arena. Values handed out by `Arena::state` are deep copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub size: Position,
    pub snakes: Vec<Snake>,
    pub point_item: Position,
    pub game_is_over: bool,
}

impl State {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            size: Position::new(width, height),
            snakes: Vec::new(),
            point_item: Position::default(),
            game_is_over: false,
        }
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn is_inside(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.size.x && position.y >= 0 && position.y < self.size.y
    }

    /// Every segment of every snake. Dead snakes stay on the field as obstacles.
    pub fn obstacles(&self) -> impl Iterator<Item = Position> + '_ {
        self.snakes.iter().flat_map(|snake| snake.segments.iter().copied())
    }

    pub fn is_obstacle(&self, position: Position) -> bool {
        self.snakes.iter().any(|snake| snake.occupies(position))
    }

    pub fn living_snakes(&self) -> impl Iterator<Item = (usize, &Snake)> + '_ {
        self.snakes
            .iter()
            .enumerate()
            .filter(|(_, snake)| snake.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|snake| snake.is_alive()).count()
    }

    /// Cells a point item may occupy: inside the grid and free of any snake.
    pub fn free_cells(&self) -> Vec<Position> {
        let mut cells = Vec::with_capacity(self.size.x as usize * self.size.y as usize);
        for x in 0..self.size.x {
            for y in 0..self.size.y {
                let position = Position::new(x, y);
                if !self.is_obstacle(position) {
                    cells.push(position);
                }
            }
        }
        cells
    }

    pub fn is_valid_point_item_position(&self, position: Position) -> bool {
        self.is_inside(position) && !self.is_obstacle(position)
    }
}
