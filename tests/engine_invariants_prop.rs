//! Property tests for engine invariants over generated sessions.
//!
//! Invariants covered:
//! - Replaying every popped delta onto an empty map reproduces the engine's
//!   occupancy exactly.
//! - While running, the active piece is always valid.
//! - Every landed piece left exactly four cells in the grid.
//! - A rejected move or rotation leaves the piece untouched.

use std::time::Duration;

use proptest::prelude::*;

use blockfall::core::delta::{replay, Occupancy};
use blockfall::core::Engine;
use blockfall::types::GameAction;

#[derive(Debug, Clone, Copy)]
enum Op {
    Action(GameAction),
    Tick,
    Update,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Action(GameAction::MoveLeft)),
        Just(Op::Action(GameAction::MoveRight)),
        Just(Op::Action(GameAction::RotateCw)),
        Just(Op::Action(GameAction::RotateCcw)),
        Just(Op::Action(GameAction::Drop)),
        Just(Op::Tick),
        Just(Op::Update),
    ]
}

proptest! {
    #[test]
    fn deltas_replay_to_engine_occupancy(
        seed in any::<u32>(),
        ops in prop::collection::vec((op_strategy(), 0u64..1500), 1..120),
    ) {
        let mut engine = Engine::new(seed);
        let mut view = Occupancy::new();
        let mut now = Duration::ZERO;
        engine.start(now);

        for (op, dt) in ops {
            now += Duration::from_millis(dt);
            match op {
                Op::Action(a) => {
                    engine.apply_action(a, now);
                }
                Op::Tick => {
                    engine.tick(now);
                }
                Op::Update => {
                    engine.update(now);
                }
            }
            replay(&engine.pop_delta(), &mut view);
            let occupancy = engine.occupancy();
            prop_assert_eq!(&view, &occupancy);

            if engine.is_running() {
                prop_assert!(engine.valid());
            }
            prop_assert_eq!(engine.grid().occupied_count() as u32, engine.landed() * 4);
        }
    }

    #[test]
    fn rejected_moves_leave_piece_unchanged(
        seed in any::<u32>(),
        ops in prop::collection::vec(op_strategy(), 1..200),
    ) {
        let mut engine = Engine::new(seed);
        engine.start(Duration::ZERO);

        for (i, op) in ops.into_iter().enumerate() {
            let now = Duration::from_millis(i as u64);
            let Op::Action(action) = op else { continue };
            if action == GameAction::Drop || !engine.is_running() {
                continue;
            }
            let before = *engine.current().unwrap();
            if !engine.apply_action(action, now) {
                prop_assert_eq!(*engine.current().unwrap(), before);
            } else {
                prop_assert_ne!(*engine.current().unwrap(), before);
            }
        }
    }
}
