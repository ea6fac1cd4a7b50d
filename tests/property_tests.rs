//! Randomised playouts checking engine invariants after every turn.

use proptest::prelude::*;

use azul_rules::board::{LaneState, LineId, PoolId, PENALTY, TRACK_CAPACITY};
use azul_rules::core::{Phase, PlayerId};
use azul_rules::rules::{DraftOutcome, MarkerLocation, RoundEngine};
use azul_rules::tiles::{Tile, COLOR_COUNT};

/// Play one turn, choosing among the legal options with `pick`.
fn play_turn(engine: &mut RoundEngine, pick: usize) -> Result<(), TestCaseError> {
    let drafts = engine.legal_drafts();
    prop_assert!(!drafts.is_empty(), "no legal draft while drafting");
    let (pool, color) = drafts[pick % drafts.len()];

    if let DraftOutcome::Held { .. } = engine.draft(pool, color).unwrap() {
        let lines = engine.legal_lines();
        prop_assert!(!lines.is_empty(), "held a hand with nowhere to go");
        let line = lines[(pick / 7) % lines.len()];
        engine.place(line).unwrap();
    }
    Ok(())
}

fn check_boards(engine: &RoundEngine) -> Result<(), TestCaseError> {
    for player in PlayerId::all() {
        let board = engine.board(player);

        prop_assert!(board.track().len() <= TRACK_CAPACITY);
        prop_assert!(PENALTY.contains(&board.track().penalty()));

        for row in LineId::all() {
            let cells = engine.grid(player)[row.index()];
            for (column, cell) in cells.iter().enumerate() {
                if let Some(color) = cell {
                    prop_assert_eq!(color.grid_column(row), column);
                }
            }

            let lane = board.rack().lane(row);
            let colors: Vec<_> = lane.slots().iter().flatten().collect();
            prop_assert!(colors.windows(2).all(|w| w[0] == w[1]));
            if let LaneState::Locked(c) = lane.state() {
                prop_assert!(colors.iter().all(|&&x| x == c));
                prop_assert!(board.grid().possible_colors(row).contains(&c));
            }
        }
    }
    Ok(())
}

fn check_marker(engine: &RoundEngine) -> Result<(), TestCaseError> {
    let on_track: Vec<_> = PlayerId::all()
        .filter(|&p| engine.board(p).track().has_marker())
        .collect();
    let in_pool = engine.draft_pool().has_marker();

    match engine.marker_location() {
        MarkerLocation::Pool => {
            prop_assert!(in_pool);
            prop_assert!(on_track.is_empty());
        }
        MarkerLocation::Track(p) => {
            prop_assert!(!in_pool);
            prop_assert_eq!(on_track, vec![p]);
        }
        other => prop_assert!(false, "marker at {:?} between turns", other),
    }
    Ok(())
}

/// Colored tiles drafted in the first round are all accounted for.
fn check_first_round_conservation(engine: &RoundEngine) -> Result<(), TestCaseError> {
    if engine.rounds_played() > 0 || engine.is_over() {
        return Ok(());
    }
    let mut total = engine.draft_pool().colored_tiles();
    for player in PlayerId::all() {
        let board = engine.board(player);
        total += board.rack().staged_tiles();
        total += board.track().len() - usize::from(board.track().has_marker());
        total += board.track().discarded() as usize;
    }
    prop_assert_eq!(total, 20);
    Ok(())
}

proptest! {
    #[test]
    fn prop_random_playout_keeps_invariants(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 1..300),
    ) {
        let mut engine = RoundEngine::with_seed(seed).unwrap();
        let mut rounds = 0;

        for pick in picks {
            if engine.is_over() {
                break;
            }
            play_turn(&mut engine, pick)?;

            prop_assert!(matches!(engine.phase(), Phase::Drafting | Phase::GameOver));
            prop_assert!(engine.hand().is_empty());
            check_boards(&engine)?;
            check_first_round_conservation(&engine)?;

            if engine.is_over() {
                prop_assert!(engine.result().is_some());
                break;
            }
            check_marker(&engine)?;

            if engine.rounds_played() > rounds {
                rounds = engine.rounds_played();
                prop_assert_eq!(engine.moves_this_round(), 0);
                for id in PoolId::satellites() {
                    prop_assert_eq!(engine.pool(id).len(), 4);
                }
                prop_assert_eq!(
                    engine.pool(PoolId::OVERFLOW).into_iter().collect::<Vec<_>>(),
                    vec![Tile::Marker]
                );
            }
        }
    }

    #[test]
    fn prop_grid_mapping_is_bijective(row in 0..COLOR_COUNT) {
        let row = LineId::new(row).unwrap();
        let mut seen = [false; COLOR_COUNT];
        for color in azul_rules::tiles::Color::ALL {
            let column = color.grid_column(row);
            prop_assert!(!seen[column]);
            seen[column] = true;
        }
    }
}
