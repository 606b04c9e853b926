//! Error types for gotcha-core
//!
//! One closed error enum for the whole state machine. Each variant carries
//! the ids or rule names needed for diagnostics; [`GotchaError::kind`] maps
//! variants onto the coarse taxonomy the application layer translates into
//! user-facing responses.

use crate::core::PlayerId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GotchaError {
    #[error("invalid game state: {reason}")]
    State { reason: String },

    /// `Game::start` aborted because cycle generation failed; the game stays
    /// un-started and the underlying failure is preserved.
    #[error("game start aborted: {source}")]
    StartAborted { source: Box<GotchaError> },

    #[error("rule violation ({rule}): {detail}")]
    Rule { rule: String, detail: String },

    #[error("player {player} is not part of this game")]
    PlayerNotFound { player: PlayerId },

    #[error("no ongoing assignment with hunter {hunter} and target {target}")]
    AssignmentNotFound { hunter: PlayerId, target: PlayerId },

    #[error("not enough players: {found} joined, {required} required")]
    InsufficientPlayers { found: usize, required: usize },

    #[error("weapon pool too small: {weapons} weapons for {players} players")]
    InsufficientWeapons { weapons: usize, players: usize },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

/// Coarse error categories for the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    State,
    RuleViolation,
    NotFound,
    InsufficientPlayers,
    InsufficientResources,
    Validation,
}

impl GotchaError {
    pub fn state(reason: impl Into<String>) -> Self {
        GotchaError::State {
            reason: reason.into(),
        }
    }

    pub fn rule(rule: impl Into<String>, detail: impl Into<String>) -> Self {
        GotchaError::Rule {
            rule: rule.into(),
            detail: detail.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GotchaError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GotchaError::State { .. } | GotchaError::StartAborted { .. } => ErrorKind::State,
            GotchaError::Rule { .. } => ErrorKind::RuleViolation,
            GotchaError::PlayerNotFound { .. } | GotchaError::AssignmentNotFound { .. } => {
                ErrorKind::NotFound
            }
            GotchaError::InsufficientPlayers { .. } => ErrorKind::InsufficientPlayers,
            GotchaError::InsufficientWeapons { .. } => ErrorKind::InsufficientResources,
            GotchaError::Validation { .. } => ErrorKind::Validation,
        }
    }
}

pub type Result<T> = std::result::Result<T, GotchaError>;
