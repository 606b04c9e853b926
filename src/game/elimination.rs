//! Elimination processing
//!
//! `process_elimination` is the only way the hunt cycle changes after start.
//! Every report is one atomic unit: preconditions run first (in a fixed
//! order, first failure wins), the rewiring plan is decided next, and only
//! then does the aggregate mutate. No failure path leaves partial state
//! behind, and no intermediate cycle state is ever observable.

use crate::core::{AssignmentStatus, Kill, PlayerId, TargetAssignment, Weapon};
use crate::error::GotchaError;
use crate::game::graph;
use crate::game::state::Game;
use crate::Result;
use chrono::Utc;

/// Whether the reported elimination counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// The kill stands: the victim leaves the cycle.
    Confirmed,
    /// The kill was contested or invalid: recorded, but the victim stays in.
    /// The matched assignment resolves to the given terminal status.
    Disputed { status: AssignmentStatus },
}

/// One elimination report.
#[derive(Debug, Clone)]
pub struct KillReport {
    pub outcome: KillOutcome,
    pub weapon: Option<Weapon>,
    pub reason: Option<String>,
}

impl KillReport {
    pub fn confirmed() -> Self {
        KillReport {
            outcome: KillOutcome::Confirmed,
            weapon: None,
            reason: None,
        }
    }

    /// Disputed report resolving the assignment as `Failed`.
    pub fn disputed() -> Self {
        Self::disputed_as(AssignmentStatus::Failed)
    }

    pub fn disputed_as(status: AssignmentStatus) -> Self {
        KillReport {
            outcome: KillOutcome::Disputed { status },
            weapon: None,
            reason: None,
        }
    }

    pub fn with_weapon(mut self, weapon: impl Into<Weapon>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// How the cycle closes around the victim after a confirmed kill. Decided
/// before any mutation.
enum Rewire {
    /// Mutual hunt: cancel the victim's edge back at the killer; if some
    /// third player was hunting the victim, point them at the killer.
    Mutual {
        cancel: usize,
        former_hunter: Option<usize>,
    },
    /// Normal chain: cancel the victim's out-edge and hand its target to the
    /// killer.
    Chain { cancel: usize, new_target: PlayerId },
    /// The victim was the last obstacle; no replacement edge is needed.
    LastStanding,
}

impl Game {
    /// Apply one elimination report from `killer` against `victim`.
    ///
    /// Precondition order: self-target, lifecycle, roster membership, both
    /// alive, weapon presence matching the rules, matching ongoing
    /// assignment. The first failing check wins and nothing mutates.
    pub fn process_elimination(
        &mut self,
        killer: PlayerId,
        victim: PlayerId,
        report: KillReport,
    ) -> Result<()> {
        if killer == victim {
            return Err(GotchaError::rule(
                "self_target",
                "a player cannot eliminate themselves",
            ));
        }
        if !self.has_started {
            return Err(GotchaError::state("the game has not started"));
        }
        if self.is_finished {
            return Err(GotchaError::state("the game has already finished"));
        }
        let killer_alive = self.player(killer)?.is_alive;
        let victim_alive = self.player(victim)?.is_alive;
        if !killer_alive {
            return Err(GotchaError::state(format!(
                "killer {killer} has already been eliminated"
            )));
        }
        if !victim_alive {
            return Err(GotchaError::state(format!(
                "victim {victim} has already been eliminated"
            )));
        }
        match (self.rules.custom_weapons, report.weapon.is_some()) {
            (true, false) => {
                return Err(GotchaError::rule(
                    "custom_weapons",
                    "this game requires a weapon on every kill report",
                ));
            }
            (false, true) => {
                return Err(GotchaError::rule(
                    "custom_weapons",
                    "this game does not use weapons",
                ));
            }
            _ => {}
        }
        let matched = graph::ongoing_between(&self.assignments, killer, victim).ok_or(
            GotchaError::AssignmentNotFound {
                hunter: killer,
                target: victim,
            },
        )?;

        match report.outcome {
            KillOutcome::Confirmed => {
                self.confirm_elimination(matched, killer, victim, report.weapon)
            }
            KillOutcome::Disputed { status } => {
                self.dispute_elimination(matched, killer, victim, report.weapon, report.reason, status)
            }
        }
    }

    fn confirm_elimination(
        &mut self,
        matched: usize,
        killer: PlayerId,
        victim: PlayerId,
        weapon: Option<Weapon>,
    ) -> Result<()> {
        // Plan phase: every remaining failure is decided here, before the
        // first write.
        let mutual = graph::ongoing_between(&self.assignments, victim, killer);
        if mutual.is_some() && !self.rules.game_mode.allows_mutual_hunts() {
            return Err(GotchaError::rule(
                "mutual_hunt",
                format!(
                    "{:?} mode does not permit resolving a mutual hunt",
                    self.rules.game_mode
                ),
            ));
        }
        let living_after = self.living_count() - 1;
        let plan = if let Some(cancel) = mutual {
            Rewire::Mutual {
                cancel,
                former_hunter: graph::ongoing_into_excluding(&self.assignments, victim, killer),
            }
        } else {
            match graph::ongoing_from(&self.assignments, victim) {
                Some(cancel) => Rewire::Chain {
                    cancel,
                    new_target: self.assignments[cancel].target,
                },
                None if living_after == 1 => Rewire::LastStanding,
                None => {
                    return Err(GotchaError::state(format!(
                        "victim {victim} has no outgoing assignment but {living_after} players remain"
                    )));
                }
            }
        };

        // Commit phase: infallible from here on.
        let now = Utc::now();
        let kill_id = self.next_id();
        let assigned_at = self.assignments[matched].assigned_at;
        self.assignments[matched].resolve(AssignmentStatus::Killed, Some(kill_id))?;
        self.kills.push(Kill::confirmed(
            kill_id,
            killer,
            victim,
            now,
            weapon,
            assigned_at,
        ));
        self.player_mut(victim)?.eliminate();

        match plan {
            Rewire::Mutual {
                cancel,
                former_hunter,
            } => {
                self.assignments[cancel].resolve(AssignmentStatus::Cancelled, None)?;
                if let Some(former) = former_hunter {
                    let hunter = self.assignments[former].hunter;
                    let inherited = self.assignments[former].weapon.clone();
                    self.assignments[former].resolve(AssignmentStatus::Cancelled, None)?;
                    let id = self.next_id();
                    self.assignments
                        .push(TargetAssignment::new(id, hunter, killer, now, inherited));
                }
            }
            Rewire::Chain { cancel, new_target } => {
                // The killer keeps the weapon bound to their original edge.
                let inherited = self.assignments[matched].weapon.clone();
                self.assignments[cancel].resolve(AssignmentStatus::Cancelled, None)?;
                let id = self.next_id();
                self.assignments
                    .push(TargetAssignment::new(id, killer, new_target, now, inherited));
            }
            Rewire::LastStanding => {}
        }

        let killer_name = self.player(killer)?.name.clone();
        let victim_name = self.player(victim)?.name.clone();
        self.logger
            .elimination(format!("{killer_name} eliminated {victim_name}"));

        if self.living_count() == 1 {
            self.finish(killer)?;
        }
        Ok(())
    }

    fn dispute_elimination(
        &mut self,
        matched: usize,
        killer: PlayerId,
        victim: PlayerId,
        weapon: Option<Weapon>,
        reason: Option<String>,
        status: AssignmentStatus,
    ) -> Result<()> {
        if !matches!(
            status,
            AssignmentStatus::Failed | AssignmentStatus::Cancelled | AssignmentStatus::Revoked
        ) {
            return Err(GotchaError::rule(
                "disputed_status",
                format!("{status:?} cannot resolve a disputed kill"),
            ));
        }

        let now = Utc::now();
        let kill_id = self.next_id();
        let assigned_at = self.assignments[matched].assigned_at;
        self.assignments[matched].resolve(status, Some(kill_id))?;
        self.kills.push(Kill::disputed(
            kill_id,
            killer,
            victim,
            now,
            weapon,
            reason,
            assigned_at,
        ));

        // The attempt does not remove the victim from the cycle: re-pair the
        // killer with the same target on a fresh assignment.
        let inherited = self.assignments[matched].weapon.clone();
        let id = self.next_id();
        self.assignments
            .push(TargetAssignment::new(id, killer, victim, now, inherited));

        let killer_name = self.player(killer)?.name.clone();
        let victim_name = self.player(victim)?.name.clone();
        self.logger.elimination(format!(
            "disputed kill of {victim_name} by {killer_name} recorded"
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameMode, Rules};
    use crate::game::state::GameId;
    use crate::ErrorKind;

    fn started_game(player_count: u32, rules: Rules) -> (Game, Vec<PlayerId>) {
        let mut game = Game::new(GameId::new(0), "test", rules, 32);
        game.seed_rng(42);
        let ids: Vec<PlayerId> = (0..player_count)
            .map(|i| game.add_player(format!("P{i}")).unwrap())
            .collect();
        game.add_admin(ids[0]).unwrap();
        game.start(None).unwrap();
        (game, ids)
    }

    /// Some live (hunter, target) pair.
    fn any_edge(game: &Game) -> (PlayerId, PlayerId) {
        game.ongoing_edges().next().unwrap()
    }

    #[test]
    fn test_confirmed_kill_rewires_cycle() {
        let (mut game, _) = started_game(5, Rules::default());
        let (killer, victim) = any_edge(&game);

        game.process_elimination(killer, victim, KillReport::confirmed())
            .unwrap();

        assert!(!game.player(victim).unwrap().is_alive);
        assert_eq!(game.living_count(), 4);
        assert_eq!(game.kills().len(), 1);
        assert!(game.kills()[0].is_valid);
        graph::verify_hunt_cycle(&game.living_ids(), game.ongoing_edges()).unwrap();
    }

    #[test]
    fn test_killer_inherits_victims_target() {
        let (mut game, _) = started_game(4, Rules::default());
        let (killer, victim) = any_edge(&game);
        let victims_target = game
            .ongoing_edges()
            .find(|(h, _)| *h == victim)
            .map(|(_, t)| t)
            .unwrap();

        game.process_elimination(killer, victim, KillReport::confirmed())
            .unwrap();

        assert!(game
            .ongoing_edges()
            .any(|(h, t)| h == killer && t == victims_target));
    }

    #[test]
    fn test_self_target_rejected_first() {
        // Not even started: the self-target check still fires first.
        let mut game = Game::new(GameId::new(0), "test", Rules::default(), 8);
        let p = game.add_player("A").unwrap();
        let err = game
            .process_elimination(p, p, KillReport::confirmed())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RuleViolation);
    }

    #[test]
    fn test_kill_before_start_rejected() {
        let mut game = Game::new(GameId::new(0), "test", Rules::default(), 8);
        let a = game.add_player("A").unwrap();
        let b = game.add_player("B").unwrap();
        let err = game
            .process_elimination(a, b, KillReport::confirmed())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_unknown_players_rejected() {
        let (mut game, _) = started_game(3, Rules::default());
        let ghost = PlayerId::new(999);
        let (killer, _) = any_edge(&game);

        let err = game
            .process_elimination(killer, ghost, KillReport::confirmed())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_dead_victim_rejected() {
        let (mut game, _) = started_game(4, Rules::default());
        let (killer, victim) = any_edge(&game);
        game.process_elimination(killer, victim, KillReport::confirmed())
            .unwrap();

        let err = game
            .process_elimination(killer, victim, KillReport::confirmed())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_no_matching_assignment_rejected() {
        let (mut game, _) = started_game(4, Rules::default());
        let (killer, victim) = any_edge(&game);
        // Reversed direction is not killer's assignment (4-player cycle).
        let err = game
            .process_elimination(victim, killer, KillReport::confirmed())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(game.kills().is_empty());
    }

    #[test]
    fn test_weapon_required_when_customized() {
        let rules = Rules::default().with_custom_weapons();
        let mut game = Game::new(GameId::new(0), "armed", rules, 8);
        game.seed_rng(7);
        let ids: Vec<PlayerId> = (0..3)
            .map(|i| game.add_player(format!("P{i}")).unwrap())
            .collect();
        game.add_admin(ids[0]).unwrap();
        let pool: Vec<Weapon> = ["spoon", "fork", "sock"]
            .iter()
            .map(|&w| Weapon::from(w))
            .collect();
        game.start(Some(&pool)).unwrap();

        let (killer, victim) = any_edge(&game);
        let err = game
            .process_elimination(killer, victim, KillReport::confirmed())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RuleViolation);

        game.process_elimination(killer, victim, KillReport::confirmed().with_weapon("spoon"))
            .unwrap();
        assert_eq!(game.kills()[0].weapon.as_ref().unwrap().as_str(), "spoon");
    }

    #[test]
    fn test_weapon_rejected_when_not_customized() {
        let (mut game, _) = started_game(3, Rules::default());
        let (killer, victim) = any_edge(&game);
        let err = game
            .process_elimination(killer, victim, KillReport::confirmed().with_weapon("spoon"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RuleViolation);
    }

    #[test]
    fn test_mutual_hunt_forbidden_in_gotcha_mode() {
        let (mut game, _) = started_game(3, Rules::default());
        // Reduce to two players; they necessarily hunt each other.
        let (killer, victim) = any_edge(&game);
        game.process_elimination(killer, victim, KillReport::confirmed())
            .unwrap();
        assert_eq!(game.living_count(), 2);

        let (killer, victim) = any_edge(&game);
        let kills_before = game.kills().len();
        let assignments_before = game.assignments().len();
        let err = game
            .process_elimination(killer, victim, KillReport::confirmed())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RuleViolation);
        // Nothing changed: no kill, no assignment mutation, both alive.
        assert_eq!(game.kills().len(), kills_before);
        assert_eq!(game.assignments().len(), assignments_before);
        assert_eq!(game.living_count(), 2);
        assert!(!game.is_finished());
    }

    #[test]
    fn test_mutual_hunt_resolves_in_vendetta_mode() {
        let (mut game, _) = started_game(3, Rules::new(GameMode::Vendetta));
        let (killer, victim) = any_edge(&game);
        game.process_elimination(killer, victim, KillReport::confirmed())
            .unwrap();

        let (killer, victim) = any_edge(&game);
        game.process_elimination(killer, victim, KillReport::confirmed())
            .unwrap();

        assert!(game.is_finished());
        assert_eq!(game.winner(), Some(killer));
        assert_eq!(game.living_count(), 1);
    }

    #[test]
    fn test_finished_game_rejects_reports() {
        let (mut game, _) = started_game(3, Rules::new(GameMode::Vendetta));
        while !game.is_finished() {
            let (killer, victim) = any_edge(&game);
            game.process_elimination(killer, victim, KillReport::confirmed())
                .unwrap();
        }
        let winner = game.winner().unwrap();
        let loser = game
            .players()
            .iter()
            .find(|p| p.id != winner)
            .map(|p| p.id)
            .unwrap();

        let err = game
            .process_elimination(winner, loser, KillReport::confirmed())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(game.winner(), Some(winner));
    }

    #[test]
    fn test_disputed_kill_leaves_cycle_intact() {
        let (mut game, _) = started_game(4, Rules::default());
        let (killer, victim) = any_edge(&game);
        let original = graph::ongoing_between(game.assignments(), killer, victim).unwrap();
        let original_id = game.assignments()[original].id;

        game.process_elimination(
            killer,
            victim,
            KillReport::disputed().with_reason("missed"),
        )
        .unwrap();

        assert!(game.player(victim).unwrap().is_alive);
        assert_eq!(game.kills().len(), 1);
        assert!(!game.kills()[0].is_valid);
        assert_eq!(game.kills()[0].reason, "missed");

        // Original assignment resolved as Failed, fresh replacement ongoing.
        assert_eq!(
            game.assignments()[original].status,
            AssignmentStatus::Failed
        );
        let fresh = graph::ongoing_between(game.assignments(), killer, victim).unwrap();
        assert_ne!(game.assignments()[fresh].id, original_id);
        graph::verify_hunt_cycle(&game.living_ids(), game.ongoing_edges()).unwrap();
    }

    #[test]
    fn test_disputed_kill_custom_terminal_status() {
        let (mut game, _) = started_game(4, Rules::default());
        let (killer, victim) = any_edge(&game);
        let original = graph::ongoing_between(game.assignments(), killer, victim).unwrap();

        game.process_elimination(
            killer,
            victim,
            KillReport::disputed_as(AssignmentStatus::Revoked),
        )
        .unwrap();

        assert_eq!(
            game.assignments()[original].status,
            AssignmentStatus::Revoked
        );
    }

    #[test]
    fn test_disputed_kill_rejects_non_terminal_status() {
        let (mut game, _) = started_game(4, Rules::default());
        let (killer, victim) = any_edge(&game);

        for status in [AssignmentStatus::Ongoing, AssignmentStatus::Killed] {
            let err = game
                .process_elimination(killer, victim, KillReport::disputed_as(status))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RuleViolation);
        }
        assert!(game.kills().is_empty());
    }

    #[test]
    fn test_elimination_chain_down_to_winner() {
        let (mut game, _) = started_game(6, Rules::new(GameMode::Vendetta));

        while game.living_count() > 1 {
            let before = game.living_count();
            let (killer, victim) = any_edge(&game);
            game.process_elimination(killer, victim, KillReport::confirmed())
                .unwrap();
            assert_eq!(game.living_count(), before - 1);
            if !game.is_finished() {
                graph::verify_hunt_cycle(&game.living_ids(), game.ongoing_edges()).unwrap();
            }
        }

        assert!(game.is_finished());
        let winner = game.winner().unwrap();
        assert!(game.player(winner).unwrap().is_alive);
        assert_eq!(game.kills().len(), 5);
    }
}
