//! Core game entities

pub mod assignment;
pub mod entity;
pub mod kill;
pub mod player;
pub mod rules;
pub mod types;

pub use assignment::{AssignmentId, AssignmentStatus, TargetAssignment};
pub use entity::EntityId;
pub use kill::{Kill, KillId, DEFAULT_INVALID_REASON, DEFAULT_VALID_REASON};
pub use player::{Player, PlayerId};
pub use rules::{AssignmentMode, GameMode, Rules};
pub use types::{AccountId, PlayerName, Weapon};
