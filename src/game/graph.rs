//! Hunt cycle queries and invariant checking
//!
//! The hunt cycle is not a stored structure; it is the set of `Ongoing`
//! assignments. While a game is running those edges must form exactly one
//! directed cycle visiting every living player once. The helpers here are
//! shared by cycle generation, elimination rewiring, and restore-time
//! validation.

use crate::core::{PlayerId, TargetAssignment};
use crate::error::GotchaError;
use crate::Result;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Index of the `Ongoing` assignment with the given hunter and target.
pub(crate) fn ongoing_between(
    assignments: &[TargetAssignment],
    hunter: PlayerId,
    target: PlayerId,
) -> Option<usize> {
    assignments
        .iter()
        .position(|a| a.is_ongoing() && a.hunter == hunter && a.target == target)
}

/// Index of the `Ongoing` out-edge of the given player.
pub(crate) fn ongoing_from(assignments: &[TargetAssignment], hunter: PlayerId) -> Option<usize> {
    assignments
        .iter()
        .position(|a| a.is_ongoing() && a.hunter == hunter)
}

/// Index of the `Ongoing` in-edge of the given player, ignoring one hunter.
///
/// Used during mutual-hunt rewiring, where the victim's in-edge from the
/// killer is already being consumed by the kill itself.
pub(crate) fn ongoing_into_excluding(
    assignments: &[TargetAssignment],
    target: PlayerId,
    excluded_hunter: PlayerId,
) -> Option<usize> {
    assignments
        .iter()
        .position(|a| a.is_ongoing() && a.target == target && a.hunter != excluded_hunter)
}

/// Verify that `edges` is exactly one directed cycle visiting every player in
/// `living` once, with no self-edges.
pub fn verify_hunt_cycle<I>(living: &[PlayerId], edges: I) -> Result<()>
where
    I: IntoIterator<Item = (PlayerId, PlayerId)>,
{
    let alive: FxHashSet<PlayerId> = living.iter().copied().collect();
    let mut next: FxHashMap<PlayerId, PlayerId> = FxHashMap::default();
    let mut in_degree: FxHashMap<PlayerId, usize> = FxHashMap::default();
    let collected: SmallVec<[(PlayerId, PlayerId); 16]> = edges.into_iter().collect();

    for (hunter, target) in collected {
        if hunter == target {
            return Err(GotchaError::state(format!(
                "player {hunter} is assigned to hunt themselves"
            )));
        }
        if !alive.contains(&hunter) || !alive.contains(&target) {
            return Err(GotchaError::state(format!(
                "hunt edge {hunter} -> {target} touches an eliminated player"
            )));
        }
        if next.insert(hunter, target).is_some() {
            return Err(GotchaError::state(format!(
                "player {hunter} has more than one ongoing target"
            )));
        }
        *in_degree.entry(target).or_insert(0) += 1;
    }

    for player in living {
        if !next.contains_key(player) {
            return Err(GotchaError::state(format!(
                "living player {player} has no ongoing target"
            )));
        }
        if in_degree.get(player).copied().unwrap_or(0) != 1 {
            return Err(GotchaError::state(format!(
                "living player {player} is not hunted by exactly one player"
            )));
        }
    }

    // Degrees are all 1, so the edges decompose into disjoint cycles; walking
    // `living.len()` steps from any start must close a tour of the whole roster.
    let Some(&start) = living.first() else {
        return Ok(());
    };
    let mut current = start;
    for _ in 0..living.len() {
        current = next[&current];
    }
    if current != start {
        return Err(GotchaError::state(
            "ongoing assignments split into multiple sub-cycles",
        ));
    }

    Ok(())
}
