//! Property-based tests for the game state machine.
//!
//! Random column sequences (including out-of-range and full columns) are fed
//! to `attempt_move`, checking the board and turn invariants after every
//! request.

use connect_four::game::{Board, Dimensions, GameState, GameStatus, MoveOutcome};
use connect_four::{MoveError, Player};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Column requests, a few of them off the board on either side
fn arb_columns(width: usize) -> impl Strategy<Value = Vec<isize>> {
    proptest::collection::vec(-2isize..(width as isize + 2), 0..80)
}

/// Board sizes from 1x1 up to 8x9
fn arb_dimensions() -> impl Strategy<Value = Dimensions> {
    (1usize..=8, 1usize..=9).prop_map(|(h, w)| Dimensions::new(h, w).unwrap())
}

fn arb_game() -> impl Strategy<Value = (Dimensions, Vec<isize>)> {
    arb_dimensions().prop_flat_map(|dims| (Just(dims), arb_columns(dims.width)))
}

fn new_state(dims: Dimensions) -> GameState {
    GameState::new("red".into(), "yellow".into(), dims).unwrap()
}

fn assert_gravity(board: &Board) {
    for row in 0..board.height().saturating_sub(1) {
        for col in 0..board.width() {
            if board.occupant_at(row, col).is_some() {
                assert!(
                    board.occupant_at(row + 1, col).is_some(),
                    "piece at ({row}, {col}) floats over an empty cell"
                );
            }
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn gravity_holds_after_every_move((dims, columns) in arb_game()) {
        let mut state = new_state(dims);
        for col in columns {
            let _ = state.attempt_move(col);
            assert_gravity(state.board());
        }
    }

    #[test]
    fn rejected_moves_change_nothing((dims, columns) in arb_game()) {
        let mut state = new_state(dims);
        for col in columns {
            let before = state.clone();
            match state.attempt_move(col) {
                Ok(_) => {}
                Err(err) => {
                    prop_assert_eq!(&state, &before);
                    match err {
                        MoveError::InvalidColumn { .. } => {
                            prop_assert!(col < 0 || col as usize >= dims.width);
                        }
                        MoveError::ColumnFull { column } => {
                            prop_assert!(state.board().is_column_full(column));
                        }
                        MoveError::GameOver => prop_assert!(state.is_terminal()),
                    }
                }
            }
        }
    }

    #[test]
    fn turns_alternate_until_the_end((dims, columns) in arb_game()) {
        let mut state = new_state(dims);
        for col in columns {
            let mover = state.current_player();
            match state.attempt_move(col) {
                Ok(MoveOutcome::Continuing { next }) => {
                    prop_assert_eq!(next, mover.other());
                    prop_assert_eq!(state.current_player(), mover.other());
                    prop_assert_eq!(state.last_move().map(|m| m.player), Some(mover));
                }
                Ok(MoveOutcome::Won(winner)) => {
                    prop_assert_eq!(winner, mover);
                    prop_assert!(state.board().check_for_win(mover));
                    prop_assert!(!state.board().check_for_win(mover.other()));
                }
                Ok(MoveOutcome::Tied) => {
                    prop_assert!(state.board().is_full());
                    prop_assert!(!state.board().check_for_win(mover));
                }
                Err(_) => prop_assert_eq!(state.current_player(), mover),
            }
        }
    }

    #[test]
    fn status_never_leaves_a_terminal_state((dims, columns) in arb_game()) {
        let mut state = new_state(dims);
        let mut ended: Option<GameStatus> = None;
        for col in columns {
            let _ = state.attempt_move(col);
            match ended {
                Some(status) => prop_assert_eq!(state.status(), status),
                None if state.is_terminal() => ended = Some(state.status()),
                None => prop_assert_eq!(state.status(), GameStatus::InProgress),
            }
        }
    }

    #[test]
    fn history_matches_the_board((dims, columns) in arb_game()) {
        let mut state = new_state(dims);
        for col in columns {
            let _ = state.attempt_move(col);
        }

        prop_assert_eq!(state.moves().len(), state.board().filled());
        for (i, placement) in state.moves().iter().enumerate() {
            let expected = if i % 2 == 0 { Player::First } else { Player::Second };
            prop_assert_eq!(placement.player, expected);
            prop_assert_eq!(
                state.board().occupant_at(placement.row, placement.col),
                Some(placement.player)
            );
        }
    }

    #[test]
    fn occupant_reads_are_idempotent((dims, columns) in arb_game()) {
        let mut state = new_state(dims);
        for col in columns {
            let _ = state.attempt_move(col);
        }

        for row in 0..dims.height {
            for col in 0..dims.width {
                let first = state.occupant_at(row, col).cloned();
                let second = state.occupant_at(row, col).cloned();
                prop_assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn legal_columns_are_exactly_the_playable_ones((dims, columns) in arb_game()) {
        let mut state = new_state(dims);
        for col in columns {
            let _ = state.attempt_move(col);
        }

        let legal = state.legal_columns();
        for col in 0..dims.width {
            let playable = !state.is_terminal()
                && state.board().find_landing_row(col as isize) != Ok(None);
            prop_assert_eq!(legal.contains(&col), playable);
        }
    }
}
