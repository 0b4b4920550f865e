use serde::{Deserialize, Serialize};

use super::Validate;
use crate::types::Direction;

/// A heading change applied right before the given tick runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedTurn {
    pub tick: u64,
    pub snake: usize,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub players: usize,
    pub snake_length: usize,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub turns: Vec<ScriptedTurn>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 20,
            players: 1,
            snake_length: 5,
            tick_interval_ms: 100,
            seed: None,
            turns: Vec::new(),
        }
    }
}

impl Validate for ArenaConfig {
    fn validate(&self) -> Result<(), String> {
        if !(2..=500).contains(&self.field_width) || !(2..=500).contains(&self.field_height) {
            return Err("Field dimensions must be between 2 and 500".to_string());
        }
        if !(1..=10).contains(&self.players) {
            return Err("Arena supports 1-10 players".to_string());
        }
        if self.snake_length == 0 {
            return Err("snake_length must be at least 1".to_string());
        }
        if !(10..=5000).contains(&self.tick_interval_ms) {
            return Err("Tick interval must be between 10ms and 5000ms".to_string());
        }
        if let Some(turn) = self.turns.iter().find(|t| t.snake >= self.players) {
            return Err(format!(
                "Scripted turn at tick {} refers to snake {}, but only {} players are configured",
                turn.tick, turn.snake, self.players
            ));
        }
        Ok(())
    }
}
