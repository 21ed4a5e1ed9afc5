//! Static evaluation of board positions
//!
//! A position is scored from one player's perspective by scanning every
//! 4-cell window on the board. A window counts only while the opponent has
//! no piece in it; its worth depends on how many own pieces it holds and
//! whether its empty cells are playable right now ("gaps") or still
//! unreachable because the cells below them are empty ("voids"). A
//! three-in-a-row completed by a gap is an immediate winning threat and
//! dominates one blocked by gravity.

use crate::board::{Board, Player, Status};
use crate::{HEIGHT, WIDTH};

/// Score of a decided win; exceeds any possible heuristic sum so a forced
/// outcome always dominates positional scoring
pub const WIN: i32 = 1_000_000;

// window weights, tunable constants
const TWO_PIECES: i32 = 5;
const THREE_WITH_VOID: i32 = 20;
const THREE_WITH_GAP: i32 = 50;

/// Scores `board` as seen by `perspective`
///
/// Decided positions collapse to `WIN`, `-WIN` or 0 regardless of the
/// heuristic sum; everything else is the window heuristic, positive when
/// `perspective` stands better.
pub fn score(board: &Board, perspective: Player) -> i32 {
    match board.winner() {
        Status::Won(winner) if winner == perspective => WIN,
        Status::Won(_) => -WIN,
        Status::Draw => 0,
        Status::InProgress => heuristic(board, perspective),
    }
}

fn heuristic(board: &Board, perspective: Player) -> i32 {
    const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

    let mut value = 0;
    for (player, sign) in [(perspective, 1), (perspective.other(), -1)] {
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                for (dr, dc) in DIRECTIONS {
                    if let Some(worth) = window_value(board, player, row, column, dr, dc) {
                        value += sign * worth;
                    }
                }
            }
        }
    }
    value
}

// Scores the 4-cell window starting at (row, column) for `player`, or None
// when the window runs off the board.
fn window_value(
    board: &Board,
    player: Player,
    row: usize,
    column: usize,
    dr: isize,
    dc: isize,
) -> Option<i32> {
    let end_row = row as isize + 3 * dr;
    let end_column = column as isize + 3 * dc;
    if end_row >= HEIGHT as isize || end_column < 0 || end_column >= WIDTH as isize {
        return None;
    }

    let mut own = 0;
    let mut gaps = 0;
    let mut voids = 0;
    for i in 0..4 {
        let r = (row as isize + i * dr) as usize;
        let c = (column as isize + i * dc) as usize;
        match board.get(r, c) {
            Some(p) if p == player => own += 1,
            // any opposing piece kills the window
            Some(_) => return Some(0),
            None => {
                if playable(board, r, c) {
                    gaps += 1;
                } else {
                    voids += 1;
                }
            }
        }
    }

    Some(match own {
        2 => TWO_PIECES,
        3 if gaps == 1 => THREE_WITH_GAP,
        3 if voids == 1 => THREE_WITH_VOID,
        _ => 0,
    })
}

// An empty cell a piece could occupy on the very next move
fn playable(board: &Board, row: usize, column: usize) -> bool {
    row == HEIGHT - 1 || board.get(row + 1, column).is_some()
}
