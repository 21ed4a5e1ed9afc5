//! Minimax game tree search with alpha-beta pruning
//!
//! The search clones the board for every branch, so no state leaks between
//! siblings and the caller's board is never touched. Pruning only discards
//! moves already proven unable to affect the parent's choice, so the result
//! is exactly the minimax value for the searched depth. Given the same
//! board, depth and perspective the search is fully deterministic.

use crate::board::{Board, Player, Status};
use crate::eval;
use crate::WIDTH;

/// Positional tie-break favouring central columns, which touch more
/// potential alignments; columns off the board score nothing
pub const fn centre_bonus(column: usize) -> i32 {
    if column >= WIDTH {
        return 0;
    }
    let from_right = WIDTH - 1 - column;
    if column < from_right {
        column as i32
    } else {
        from_right as i32
    }
}

/// A depth-limited minimax searcher
pub struct Search {
    /// The number of nodes visited by this `Search` so far (for diagnostics only)
    pub node_count: usize,
}

impl Search {
    pub fn new() -> Self {
        Self { node_count: 0 }
    }

    /// Picks the best column for the side to move on `board`
    ///
    /// Every legal move is tried in ascending column order; the resulting
    /// child is searched `max_depth - 1` plies deep from the opponent's
    /// turn, and a small [`centre_bonus`] is added on top of the search
    /// value. The first move seen wins ties. `max_depth` of 0 degenerates
    /// to a one-ply greedy evaluation. Returns `None` when no legal move
    /// remains, which callers must treat as a draw rather than a failure.
    pub fn best_move(&mut self, board: &Board, max_depth: u32) -> Option<usize> {
        let perspective = board.to_move();
        let mut best: Option<(usize, i32)> = None;

        for (column, child) in board.children() {
            let value = self.alpha_beta(
                &child,
                max_depth.saturating_sub(1),
                i32::MIN,
                i32::MAX,
                false,
                perspective,
            ) + centre_bonus(column);

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((column, value));
            }
        }

        best.map(|(column, _)| column)
    }

    /// Recursive minimax evaluation of `board` with alpha-beta pruning
    ///
    /// Scores are always from `perspective`'s point of view; `maximizing`
    /// says whose turn the current node simulates. Exhausted depth, a
    /// decided winner or a full board all fall through to the static
    /// evaluation.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        perspective: Player,
    ) -> i32 {
        self.node_count += 1;

        let children = board.children();
        if depth == 0 || board.winner() != Status::InProgress || children.is_empty() {
            return eval::score(board, perspective);
        }

        let mut value = if maximizing { i32::MIN } else { i32::MAX };
        for (_, child) in children {
            let child_value =
                self.alpha_beta(&child, depth - 1, alpha, beta, !maximizing, perspective);

            if maximizing {
                value = value.max(child_value);
                alpha = alpha.max(value);
            } else {
                value = value.min(child_value);
                beta = beta.min(value);
            }
            // the remaining siblings cannot change the parent's choice
            if beta <= alpha {
                break;
            }
        }
        value
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}
