//! The game aggregate
//!
//! `Game` is the single consistency boundary: it owns its players,
//! assignments and kills, and every cross-reference resolves by id into those
//! collections. `start` and `process_elimination` take `&mut self`, so
//! exclusive access per game is enforced by ownership; callers that share a
//! game across threads wrap it in their own lock, and operations on distinct
//! games are fully independent.

use crate::core::{
    AccountId, EntityId, Kill, Player, PlayerId, PlayerName, Rules, TargetAssignment, Weapon,
};
use crate::error::GotchaError;
use crate::game::logger::GameLogger;
use crate::game::{assign, graph};
use crate::Result;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Typed id for games, assigned by the surrounding application.
pub type GameId = EntityId<Game>;

/// One elimination game: roster, rules, hunt cycle, kill log.
///
/// Lifecycle: Created → Started → Finished. The Started→Finished transition
/// happens only inside the elimination win check; there is no public way to
/// force it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub rules: Rules,

    /// Roster cap decided by the surrounding application.
    pub max_players: usize,

    pub(crate) players: Vec<Player>,
    pub(crate) assignments: Vec<TargetAssignment>,
    pub(crate) kills: Vec<Kill>,
    pub(crate) admins: FxHashSet<PlayerId>,

    pub(crate) has_started: bool,
    pub(crate) is_finished: bool,
    pub(crate) winner: Option<PlayerId>,

    /// Serializable RNG driving cycle generation; reseed via [`seed_rng`]
    /// for reproducible games.
    ///
    /// [`seed_rng`]: Game::seed_rng
    pub(crate) rng: ChaCha12Rng,

    /// Unified id generator shared by all entity types.
    pub(crate) next_entity_id: u32,

    #[serde(skip, default)]
    pub(crate) logger: GameLogger,
}

impl Game {
    pub fn new(id: GameId, name: impl Into<String>, rules: Rules, max_players: usize) -> Self {
        Game {
            id,
            name: name.into(),
            created_at: Utc::now(),
            started_at: None,
            rules,
            max_players,
            players: Vec::new(),
            assignments: Vec::new(),
            kills: Vec::new(),
            admins: FxHashSet::default(),
            has_started: false,
            is_finished: false,
            winner: None,
            rng: ChaCha12Rng::seed_from_u64(0),
            next_entity_id: 0,
            logger: GameLogger::default(),
        }
    }

    /// Set the RNG seed for deterministic cycle generation.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Allocate the next entity id (unified across all entity types).
    pub(crate) fn next_id<T>(&mut self) -> EntityId<T> {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    // === Roster ===

    /// Add a player to the roster. Only legal before the game starts.
    pub fn add_player(&mut self, name: impl Into<PlayerName>) -> Result<PlayerId> {
        let name = name.into();
        if self.has_started {
            return Err(GotchaError::state(
                "players cannot join after the game has started",
            ));
        }
        if self.players.len() >= self.max_players {
            return Err(GotchaError::rule(
                "max_players",
                format!("the roster is capped at {} players", self.max_players),
            ));
        }
        if self.players.iter().any(|p| p.name == name) {
            return Err(GotchaError::validation(
                "player name",
                format!("the name \"{name}\" is already taken in this game"),
            ));
        }
        let id = self.next_id();
        self.players.push(Player::new(id, name));
        Ok(id)
    }

    /// Remove a player from the roster (and the admin set). Only legal
    /// before the game starts.
    pub fn remove_player(&mut self, player: PlayerId) -> Result<()> {
        if self.has_started {
            return Err(GotchaError::state(
                "players cannot leave after the game has started",
            ));
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player)
            .ok_or(GotchaError::PlayerNotFound { player })?;
        self.players.remove(idx);
        self.admins.remove(&player);
        Ok(())
    }

    /// Link a roster member to an external account.
    pub fn link_account(&mut self, player: PlayerId, account: AccountId) -> Result<()> {
        self.player_mut(player)?.account = Some(account);
        Ok(())
    }

    pub fn add_admin(&mut self, player: PlayerId) -> Result<()> {
        // Admins must be roster members.
        self.player(player)?;
        self.admins.insert(player);
        Ok(())
    }

    pub fn remove_admin(&mut self, player: PlayerId) -> Result<()> {
        if !self.admins.remove(&player) {
            return Err(GotchaError::PlayerNotFound { player });
        }
        Ok(())
    }

    // === Lookups ===

    pub fn player(&self, player: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == player)
            .ok_or(GotchaError::PlayerNotFound { player })
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == player)
            .ok_or(GotchaError::PlayerNotFound { player })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn living_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive)
    }

    pub fn living_count(&self) -> usize {
        self.living_players().count()
    }

    pub(crate) fn living_ids(&self) -> Vec<PlayerId> {
        self.living_players().map(|p| p.id).collect()
    }

    pub fn assignments(&self) -> &[TargetAssignment] {
        &self.assignments
    }

    /// The live hunt cycle as (hunter, target) pairs.
    pub fn ongoing_edges(&self) -> impl Iterator<Item = (PlayerId, PlayerId)> + '_ {
        self.assignments
            .iter()
            .filter(|a| a.is_ongoing())
            .map(|a| (a.hunter, a.target))
    }

    pub fn kills(&self) -> &[Kill] {
        &self.kills
    }

    pub fn admins(&self) -> &FxHashSet<PlayerId> {
        &self.admins
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    // === Lifecycle ===

    /// Start the game: generate the hunt cycle and move Created → Started.
    ///
    /// A weapon pool must be supplied exactly when `rules.custom_weapons` is
    /// set. On any generation failure the transition aborts completely: the
    /// error is wrapped as [`GotchaError::StartAborted`] and the game stays
    /// Created with no partial cycle.
    pub fn start(&mut self, weapon_pool: Option<&[Weapon]>) -> Result<()> {
        if self.has_started {
            return Err(GotchaError::state("the game has already started"));
        }
        if self.is_finished {
            return Err(GotchaError::state("the game has already finished"));
        }
        if self.admins.is_empty() {
            return Err(GotchaError::state(
                "at least one admin is required to start a game",
            ));
        }

        let living = self.living_ids();
        let edges = assign::build_hunt_cycle(&living, &self.rules, weapon_pool, &mut self.rng)
            .map_err(|e| GotchaError::StartAborted {
                source: Box::new(e),
            })?;

        let now = Utc::now();
        for edge in edges {
            let id = self.next_id();
            self.assignments.push(TargetAssignment::new(
                id,
                edge.hunter,
                edge.target,
                now,
                edge.weapon,
            ));
        }
        self.has_started = true;
        self.started_at = Some(now);
        self.logger.lifecycle(format!(
            "game \"{}\" started with {} players",
            self.name,
            living.len()
        ));
        Ok(())
    }

    /// Terminal transition, reachable only from the elimination win check.
    pub(crate) fn finish(&mut self, winner: PlayerId) -> Result<()> {
        if self.is_finished || self.winner.is_some() {
            return Err(GotchaError::state("the winner has already been decided"));
        }
        let name = self.player(winner)?.name.clone();
        self.winner = Some(winner);
        self.is_finished = true;
        self.logger
            .lifecycle(format!("game \"{}\" finished, winner: {name}", self.name));
        Ok(())
    }

    // === Invariants ===

    /// Defensive re-validation of the aggregate invariants.
    ///
    /// Run when re-entering the state machine from persisted state; corrupted
    /// or partial snapshots must never be accepted silently.
    pub fn validate(&self) -> Result<()> {
        if self.is_finished != self.winner.is_some() {
            return Err(GotchaError::state(
                "winner must be set exactly when the game is finished",
            ));
        }
        if self.is_finished && !self.has_started {
            return Err(GotchaError::state("a finished game must have started"));
        }
        if let Some(winner) = self.winner {
            self.player(winner)?;
        }
        for admin in &self.admins {
            self.player(*admin)?;
        }
        for a in &self.assignments {
            self.player(a.hunter)?;
            self.player(a.target)?;
        }
        for k in &self.kills {
            self.player(k.killer)?;
            self.player(k.victim)?;
        }
        if !self.has_started && !self.assignments.is_empty() {
            return Err(GotchaError::state(
                "an un-started game cannot have assignments",
            ));
        }
        if self.has_started && !self.is_finished {
            graph::verify_hunt_cycle(&self.living_ids(), self.ongoing_edges())?;
        }
        Ok(())
    }
}
