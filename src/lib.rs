//! gotcha-core — state machine for elimination-style social hunting games
//!
//! A game holds a roster of players, each assigned to hunt exactly one other
//! living player so that the `Ongoing` assignments always form a single
//! directed cycle over the living roster. Confirmed eliminations rewire the
//! cycle in place; the game finishes when one player remains.
//!
//! The `Game` aggregate is the consistency boundary: `start` and
//! `process_elimination` take `&mut self`, so per-game serialization of
//! operations is enforced by ownership, and distinct games are fully
//! independent. Transport, storage layout, and account management belong to
//! the surrounding application.

pub mod boundary;
pub mod core;
pub mod error;
pub mod game;
pub mod snapshot;

pub use error::{ErrorKind, GotchaError, Result};

pub use crate::core::{
    AccountId, AssignmentId, AssignmentMode, AssignmentStatus, EntityId, GameMode, Kill, KillId,
    Player, PlayerId, PlayerName, Rules, TargetAssignment, Weapon,
};

pub use crate::game::{
    verify_hunt_cycle, Game, GameId, GameLogger, KillOutcome, KillReport, LogEntry, OutputMode,
    Verbosity, MIN_PLAYERS,
};

pub use crate::boundary::{clean_display_name, IdentityProvider, TextSanitizer};
pub use crate::snapshot::{GameSnapshot, SnapshotError};
