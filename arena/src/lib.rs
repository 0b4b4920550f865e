//! Grid snake arena: snakes move one cell per tick on a bounded board,
//! grow by eating the point item and die on walls, themselves or each other.

pub mod arena;
pub mod config;
pub mod error;
pub mod logger;
pub mod rng;
pub mod snake;
pub mod state;
pub mod types;

pub use arena::{Arena, TickOutcome};
pub use error::ArenaError;
pub use rng::SessionRng;
pub use snake::Snake;
pub use state::State;
pub use types::{DeathReason, Direction, Position};
