use arena::config::ArenaConfig;
use arena::{log, Arena, Direction, Position, SessionRng};

/// Player 0 starts in the middle of the board, player 1 at a third, and so on.
pub fn start_position(player: usize, width: i32, height: i32) -> Position {
    let divisor = player as i32 + 2;
    Position::new(width / divisor, height / divisor)
}

pub struct PlacedArena {
    pub arena: Arena,
    /// Arena index of every configured player, `None` where placement failed.
    pub slots: Vec<Option<usize>>,
}

pub fn build_arena(config: &ArenaConfig) -> PlacedArena {
    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let mut arena = Arena::new(config.field_width, config.field_height, rng);

    let slots = (0..config.players)
        .map(|player| {
            let start = start_position(player, config.field_width, config.field_height);
            match arena.add_snake(start.x, start.y, config.snake_length, Direction::East) {
                Ok(index) => Some(index),
                Err(e) => {
                    log!("Player {} could not be placed: {}", player + 1, e);
                    None
                }
            }
        })
        .collect();

    PlacedArena { arena, slots }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(players: usize, width: i32, height: i32) -> ArenaConfig {
        ArenaConfig {
            field_width: width,
            field_height: height,
            players,
            seed: Some(11),
            ..ArenaConfig::default()
        }
    }

    #[test]
    fn test_start_positions() {
        assert_eq!(start_position(0, 40, 20), Position::new(20, 10));
        assert_eq!(start_position(1, 40, 20), Position::new(13, 6));
        assert_eq!(start_position(2, 40, 20), Position::new(10, 5));
    }

    #[test]
    fn test_two_players_are_placed() {
        let placed = build_arena(&config(2, 40, 20));
        assert_eq!(placed.slots, vec![Some(0), Some(1)]);

        let state = placed.arena.state();
        assert_eq!(state.snakes.len(), 2);
        assert_eq!(state.snakes[0].head(), Position::new(20, 10));
        assert_eq!(state.snakes[1].head(), Position::new(13, 6));
        assert!(state.snakes.iter().all(|s| s.len() == 5 && s.heading == Direction::East));
        assert_eq!(placed.arena.seed(), 11);
    }

    #[test]
    fn test_failed_placement_leaves_empty_slot() {
        // On a two-row board players 1 and 2 both start on row 0 and overlap.
        let placed = build_arena(&config(3, 12, 2));
        let state = placed.arena.state();
        assert_eq!(placed.slots[0], Some(0));
        assert_eq!(placed.slots.iter().flatten().count(), state.snakes.len());
        assert!(placed.slots.contains(&None));
    }
}
