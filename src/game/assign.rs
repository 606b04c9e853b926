//! Initial hunt cycle generation
//!
//! One generator serves both assignment modes: shuffle the roster, then
//! connect consecutive players circularly. A circular connection over
//! distinct players is always a derangement forming a single N-cycle, so the
//! structural guarantee does not depend on which shuffle ordered the roster.
//! The modes differ only in the random stream used for the shuffle.

use crate::core::{AssignmentMode, PlayerId, Rules, Weapon};
use crate::error::GotchaError;
use crate::game::graph;
use crate::Result;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Minimum roster size for a game to start.
pub const MIN_PLAYERS: usize = 3;

/// A generated hunter→target edge, with its bound weapon when weapon
/// customization is on.
#[derive(Debug, Clone)]
pub(crate) struct HuntEdge {
    pub hunter: PlayerId,
    pub target: PlayerId,
    pub weapon: Option<Weapon>,
}

/// Build the initial hunt cycle over the given living players.
///
/// Checks, in order: enough players, weapon pool presence matching the
/// `custom_weapons` rule, pool size. The returned edges are re-verified
/// against the single-cycle invariant before being handed back.
pub(crate) fn build_hunt_cycle(
    living: &[PlayerId],
    rules: &Rules,
    weapon_pool: Option<&[Weapon]>,
    rng: &mut ChaCha12Rng,
) -> Result<Vec<HuntEdge>> {
    let n = living.len();
    if n < MIN_PLAYERS {
        return Err(GotchaError::InsufficientPlayers {
            found: n,
            required: MIN_PLAYERS,
        });
    }

    match (rules.custom_weapons, weapon_pool) {
        (true, None) => {
            return Err(GotchaError::rule(
                "custom_weapons",
                "weapon customization is enabled but no weapon pool was supplied",
            ));
        }
        (false, Some(_)) => {
            return Err(GotchaError::rule(
                "custom_weapons",
                "a weapon pool was supplied but weapon customization is disabled",
            ));
        }
        (true, Some(pool)) if pool.len() < n => {
            return Err(GotchaError::InsufficientWeapons {
                weapons: pool.len(),
                players: n,
            });
        }
        _ => {}
    }

    let mut order: Vec<PlayerId> = living.to_vec();
    match rules.assignment_mode {
        AssignmentMode::Sequential => order.shuffle(rng),
        AssignmentMode::Random => {
            // Independent ordering: a fresh stream derived from (and
            // advancing) the caller's RNG, so the result is still
            // reproducible from the game seed.
            let mut derived = ChaCha12Rng::seed_from_u64(rng.gen());
            order.shuffle(&mut derived);
        }
    }

    let mut weapons: Vec<Option<Weapon>> = match weapon_pool {
        Some(pool) => {
            let mut pool: Vec<Weapon> = pool.to_vec();
            pool.shuffle(rng);
            pool.truncate(n);
            pool.into_iter().map(Some).collect()
        }
        None => vec![None; n],
    };

    let edges: Vec<HuntEdge> = (0..n)
        .map(|i| HuntEdge {
            hunter: order[i],
            target: order[(i + 1) % n],
            weapon: weapons[i].take(),
        })
        .collect();

    graph::verify_hunt_cycle(living, edges.iter().map(|e| (e.hunter, e.target)))?;

    Ok(edges)
}
