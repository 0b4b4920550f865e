use std::fmt;
use std::time::Duration;
use tokio::time::interval;

use arena::config::{ArenaConfig, ScriptedTurn};
use arena::{log, Arena, State, TickOutcome};
use crate::setup::PlacedArena;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver,
    TickLimit,
    Interrupted,
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SessionEnd::GameOver => "game over",
            SessionEnd::TickLimit => "tick limit reached",
            SessionEnd::Interrupted => "interrupted",
        };
        write!(f, "{}", text)
    }
}

/// Drives an arena on a fixed cadence and feeds it the scripted heading changes.
pub struct ArenaSession {
    arena: Arena,
    slots: Vec<Option<usize>>,
    turns: Vec<ScriptedTurn>,
    next_turn: usize,
    tick_interval: Duration,
    max_ticks: Option<u64>,
    ticks: u64,
}

impl ArenaSession {
    pub fn new(placed: PlacedArena, config: &ArenaConfig, max_ticks: Option<u64>) -> Self {
        let mut turns = config.turns.clone();
        turns.sort_by_key(|turn| turn.tick);

        Self {
            arena: placed.arena,
            slots: placed.slots,
            turns,
            next_turn: 0,
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            max_ticks,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> State {
        self.arena.state()
    }

    fn apply_scripted_turns(&mut self) {
        while let Some(turn) = self.turns.get(self.next_turn).copied() {
            if turn.tick > self.ticks {
                break;
            }
            self.next_turn += 1;

            let Some(index) = self.slots.get(turn.snake).copied().flatten() else {
                log!("Skipping turn for unplaced player {}", turn.snake + 1);
                continue;
            };
            if let Err(e) = self.arena.set_snake_heading(index, turn.direction) {
                log!("Player {} failed to turn {}: {}", turn.snake + 1, turn.direction, e);
            }
        }
    }

    pub fn step(&mut self) -> TickOutcome {
        self.apply_scripted_turns();
        let outcome = self.arena.tick();
        self.ticks += 1;
        outcome
    }

    pub async fn run(&mut self) -> SessionEnd {
        let mut tick_interval_timer = interval(self.tick_interval);

        loop {
            tick_interval_timer.tick().await;

            if self.arena.is_over() {
                return SessionEnd::GameOver;
            }
            if self.max_ticks.is_some_and(|max| self.ticks >= max) {
                return SessionEnd::TickLimit;
            }

            self.step();
        }
    }

    /// One line per configured player: segment count and, for dead snakes, the cause.
    pub fn scoreboard(&self) -> Vec<String> {
        let state = self.arena.state();
        self.slots
            .iter()
            .enumerate()
            .map(|(player, slot)| {
                match slot.and_then(|index| state.snakes.get(index)) {
                    Some(snake) => match snake.death_reason {
                        Some(reason) => format!("Player {}: {} ({})", player + 1, snake.score(), reason),
                        None => format!("Player {}: {}", player + 1, snake.score()),
                    },
                    None => format!("Player {}: not placed", player + 1),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena::{DeathReason, Direction, Position};
    use crate::setup::build_arena;

    fn config(turns: Vec<ScriptedTurn>) -> ArenaConfig {
        ArenaConfig {
            field_width: 40,
            field_height: 20,
            players: 1,
            tick_interval_ms: 10,
            seed: Some(5),
            turns,
            ..ArenaConfig::default()
        }
    }

    fn session(config: &ArenaConfig, max_ticks: Option<u64>) -> ArenaSession {
        ArenaSession::new(build_arena(config), config, max_ticks)
    }

    fn turn(tick: u64, direction: Direction) -> ScriptedTurn {
        ScriptedTurn { tick, snake: 0, direction }
    }

    #[test]
    fn test_scripted_turns_apply_before_their_tick() {
        let config = config(vec![turn(1, Direction::South), turn(0, Direction::North)]);
        let mut session = session(&config, None);

        session.step();
        assert_eq!(session.state().snakes[0].head(), Position::new(20, 9));

        session.step();
        // South right after North is a reversal and gets dropped.
        assert_eq!(session.state().snakes[0].head(), Position::new(20, 8));
        assert_eq!(session.ticks(), 2);
    }

    #[test]
    fn test_square_loop_ends_game() {
        let config = config(vec![
            turn(1, Direction::South),
            turn(2, Direction::West),
            turn(3, Direction::North),
        ]);
        let mut session = session(&config, None);
        let head = session.state().snakes[0].head();

        for _ in 0..3 {
            session.step();
            assert!(!session.state().game_is_over);
        }
        let outcome = session.step();
        assert!(outcome.game_over);

        let state = session.state();
        assert_eq!(state.snakes[0].death_reason, Some(DeathReason::SelfCollision));
        assert_eq!(state.snakes[0].head(), head);
    }

    #[test]
    fn test_scoreboard_lines() {
        let mut config = config(Vec::new());
        config.players = 3;
        config.field_height = 2;
        config.field_width = 12;
        let mut session = session(&config, None);
        while !session.state().game_is_over {
            session.step();
        }

        let lines = session.scoreboard();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Player 1: "));
        assert!(lines[0].contains("hit a wall"), "{}", lines[0]);
        assert_eq!(lines[2], "Player 3: not placed");
    }

    #[tokio::test]
    async fn test_run_stops_at_tick_limit() {
        let config = config(Vec::new());
        let mut session = session(&config, Some(3));
        assert_eq!(session.run().await, SessionEnd::TickLimit);
        assert_eq!(session.ticks(), 3);
        assert!(!session.state().game_is_over);
    }

    #[tokio::test]
    async fn test_run_stops_at_game_over() {
        let mut config = config(Vec::new());
        config.field_width = 4;
        config.field_height = 3;
        config.snake_length = 1;
        let mut session = session(&config, Some(100));
        assert_eq!(session.run().await, SessionEnd::GameOver);
        assert!(session.state().game_is_over);
        assert!(session.ticks() <= 2);
    }
}
