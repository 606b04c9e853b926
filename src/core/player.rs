//! Player representation

use crate::core::{AccountId, EntityId, PlayerName};
use serde::{Deserialize, Serialize};

/// Typed id for players.
pub type PlayerId = EntityId<Player>;

/// A participant in one game.
///
/// Players are owned by their `Game`; everything else refers to them by
/// `PlayerId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Display name within the game
    pub name: PlayerName,

    /// Linkage to the external account system, if any
    pub account: Option<AccountId>,

    /// Is the player still in the hunt?
    pub is_alive: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>) -> Self {
        Player {
            id,
            name: name.into(),
            account: None,
            is_alive: true,
        }
    }

    pub fn with_account(id: PlayerId, name: impl Into<PlayerName>, account: AccountId) -> Self {
        Player {
            account: Some(account),
            ..Player::new(id, name)
        }
    }

    /// Remove the player from the hunt. One-way: the elimination state
    /// machine never revives a player.
    pub fn eliminate(&mut self) {
        self.is_alive = false;
    }
}
