use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_chase::{Game, HeldKeys, Maze, PixelPos, Timing};

fn keys_from_bits(bits: u8) -> HeldKeys {
    HeldKeys {
        up: bits & 1 != 0,
        down: bits & 2 != 0,
        left: bits & 4 != 0,
        right: bits & 8 != 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn session_invariants_hold_every_tick(
        seed in any::<u64>(),
        inputs in prop::collection::vec((0u8..16, 1usize..40), 1..20),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new(Maze::classic().unwrap(), Timing::default(), &mut rng);
        let layout: HashSet<PixelPos> = game.pellets().layout().collect();
        let total = game.pellets().len();
        let mut eaten_total = 0u32;
        let mut ghosts = game.ghosts().len();

        for (bits, hold) in inputs {
            for _ in 0..hold {
                let score_before = game.score();
                let report = game.step(keys_from_bits(bits), &mut rng);
                eaten_total += report.dots_eaten;

                // every entity stands on an open cell
                prop_assert!(game.maze().is_passable(game.player().pos));
                for ghost in game.ghosts() {
                    prop_assert!(game.maze().is_passable(ghost.pos));
                }

                // dots are split between board and respawn queue, never lost
                let active: HashSet<PixelPos> = game.pellets().active().collect();
                let pending: HashSet<PixelPos> =
                    game.pellets().pending().map(|(pos, _)| pos).collect();
                prop_assert!(active.is_disjoint(&pending));
                prop_assert_eq!(active.len() + pending.len(), total);
                let union: HashSet<PixelPos> = active.union(&pending).copied().collect();
                prop_assert_eq!(&union, &layout);

                // nothing waits longer than the respawn delay
                for (_, at) in game.pellets().pending() {
                    prop_assert!(game.tick() - at < game.timing().respawn_delay);
                }

                prop_assert!(game.score() >= score_before);
                prop_assert_eq!(game.score(), eaten_total);
                prop_assert!(game.ghosts().len() >= ghosts);
                ghosts = game.ghosts().len();
            }
        }
    }

    #[test]
    fn ghost_count_follows_the_clock(seed in any::<u64>(), ticks in 1u64..700) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new(Maze::classic().unwrap(), Timing::default(), &mut rng);
        while game.tick() < ticks && !game.is_over() {
            game.step(HeldKeys::default(), &mut rng);
        }
        let expected = 1 + (game.tick() / 150) as usize;
        prop_assert_eq!(game.ghosts().len(), expected);
    }
}
