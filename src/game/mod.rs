//! Game aggregate and state machine

pub mod assign;
pub mod elimination;
pub mod graph;
pub mod logger;
pub mod state;

pub use assign::MIN_PLAYERS;
pub use elimination::{KillOutcome, KillReport};
pub use graph::verify_hunt_cycle;
pub use logger::{GameLogger, LogEntry, OutputMode, Verbosity};
pub use state::{Game, GameId};
