//! Property tests for the hunt cycle invariant
//!
//! For any roster size and seed: starting a game installs exactly one cycle
//! over all players, and every confirmed elimination leaves exactly one
//! cycle over the remaining living players until a single winner stands.

use gotcha_core::{
    verify_hunt_cycle, AssignmentMode, Game, GameId, GameMode, KillReport, PlayerId, Rules,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

fn started_game(n: usize, seed: u64, rules: Rules) -> (Game, Vec<PlayerId>) {
    let mut game = Game::new(GameId::new(0), "prop", rules, n.max(3));
    game.seed_rng(seed);
    let ids: Vec<PlayerId> = (0..n)
        .map(|i| game.add_player(format!("P{i}")).unwrap())
        .collect();
    game.add_admin(ids[0]).unwrap();
    game.start(None).unwrap();
    (game, ids)
}

proptest! {
    #[test]
    fn start_installs_single_cycle(n in 3usize..24, seed in any::<u64>()) {
        let (game, ids) = started_game(n, seed, Rules::default());

        verify_hunt_cycle(&ids, game.ongoing_edges()).unwrap();
        prop_assert_eq!(game.ongoing_edges().count(), n);
        for (hunter, target) in game.ongoing_edges() {
            prop_assert_ne!(hunter, target);
        }
    }

    #[test]
    fn random_mode_installs_single_cycle(n in 3usize..24, seed in any::<u64>()) {
        let rules = Rules::default().with_assignment_mode(AssignmentMode::Random);
        let (game, ids) = started_game(n, seed, rules);

        verify_hunt_cycle(&ids, game.ongoing_edges()).unwrap();
    }

    #[test]
    fn same_seed_reproduces_cycle(n in 3usize..16, seed in any::<u64>()) {
        let (a, _) = started_game(n, seed, Rules::default());
        let (b, _) = started_game(n, seed, Rules::default());

        let edges_a: Vec<_> = a.ongoing_edges().collect();
        let edges_b: Vec<_> = b.ongoing_edges().collect();
        prop_assert_eq!(edges_a, edges_b);
    }

    /// Confirmed eliminations in arbitrary order keep the invariant at every
    /// step, and the last player standing wins.
    #[test]
    fn eliminations_preserve_cycle(n in 3usize..16, seed in any::<u64>(), order_seed in any::<u64>()) {
        let (mut game, _) = started_game(n, seed, Rules::new(GameMode::Vendetta));
        let mut order = ChaCha12Rng::seed_from_u64(order_seed);

        while !game.is_finished() {
            let edges: Vec<_> = game.ongoing_edges().collect();
            let (killer, victim) = edges[order.gen_range(0..edges.len())];
            game.process_elimination(killer, victim, KillReport::confirmed()).unwrap();

            if !game.is_finished() {
                let living: Vec<PlayerId> = game.living_players().map(|p| p.id).collect();
                verify_hunt_cycle(&living, game.ongoing_edges()).unwrap();
                prop_assert_eq!(game.ongoing_edges().count(), game.living_count());
            }
        }

        prop_assert_eq!(game.living_count(), 1);
        let winner = game.winner().unwrap();
        prop_assert!(game.player(winner).unwrap().is_alive);
        prop_assert_eq!(game.kills().len(), n - 1);
    }

    /// Standard mode preserves the invariant down to the two-player endgame,
    /// where the mutual pair is unresolvable by design.
    #[test]
    fn standard_mode_stops_at_mutual_pair(n in 3usize..12, seed in any::<u64>()) {
        let (mut game, _) = started_game(n, seed, Rules::default());

        while game.living_count() > 2 {
            let (killer, victim) = game.ongoing_edges().next().unwrap();
            game.process_elimination(killer, victim, KillReport::confirmed()).unwrap();
            let living: Vec<PlayerId> = game.living_players().map(|p| p.id).collect();
            verify_hunt_cycle(&living, game.ongoing_edges()).unwrap();
        }

        let (p1, p2) = game.ongoing_edges().next().unwrap();
        prop_assert!(game.process_elimination(p1, p2, KillReport::confirmed()).is_err());
        prop_assert!(!game.is_finished());
    }
}
