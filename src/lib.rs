//! A Connect 4 rules engine with computer opponents
//!
//! The engine enforces the game rules on a fixed 6x7 grid and picks moves
//! for the AI opponent with a depth-limited minimax search over a
//! window-threat evaluation.
//!
//! # Basic Usage
//!
//! ```
//! use connectfour::board::Board;
//! use connectfour::search::Search;
//!
//! let mut board = Board::new();
//! let best_move = Search::new().best_move(&board, 1);
//!
//! // nothing distinguishes the opening columns yet, so the centre wins
//! assert_eq!(best_move, Some(3));
//! board.apply_move(3)?;
//! # Ok::<(), connectfour::board::IllegalMove>(())
//! ```

use static_assertions::*;
pub use anyhow;

pub mod agent;

pub mod board;

pub mod eval;

pub mod knowledge;

pub mod search;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// ensure the base-3 canonical encoding of a full grid fits in a u128
const_assert!(WIDTH * HEIGHT <= 80);
