//! The rules of the game: legal moves, gravity and win detection

use std::fmt;

use thiserror::Error;

use crate::{HEIGHT, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "1"),
            Player::Two => write!(f, "2"),
        }
    }
}

/// The outcome of a position as seen by [`Board::winner`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Status {
    InProgress,
    Won(Player),
    Draw,
}

/// A move request that violates the rules, always avoidable by checking
/// [`Board::is_legal_move`] first
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum IllegalMove {
    #[error("invalid move, column {0} out of range")]
    OutOfRange(usize),
    #[error("invalid move, column {0} full")]
    ColumnFull(usize),
}

/// A grid handed to [`Board::from_grid`] that violates gravity
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
#[error("invalid grid, floating piece at row {row}, column {column}")]
pub struct InvalidGrid {
    pub row: usize,
    pub column: usize,
}

/// Raw cell matrix, row 0 at the top of the board
pub type Grid = [[Option<Player>; WIDTH]; HEIGHT];

/// A connect four board
///
/// Owns the cell grid, the player to move and the move counter. Mutation
/// happens only through [`apply_move`]; the search takes [`Clone`] snapshots
/// to explore hypothetical futures without touching the live board.
///
/// [`apply_move`]: Board::apply_move
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    grid: Grid,
    to_move: Player,
    num_moves: usize,
}

impl Board {
    /// Creates an empty board with player one to move
    pub fn new() -> Self {
        Self {
            grid: [[None; WIDTH]; HEIGHT],
            to_move: Player::One,
            num_moves: 0,
        }
    }

    /// Builds a board from an externally supplied grid
    ///
    /// The grid is validated eagerly: every column must be filled from the
    /// bottom row upward with no holes. Piece counts are not required to be
    /// balanced, so hypothetical positions can be constructed; the player to
    /// move is inferred from the counts (equal counts put player one on the
    /// move, as in a position reached by legal play).
    pub fn from_grid(grid: Grid) -> Result<Self, InvalidGrid> {
        let mut player_one = 0usize;
        let mut player_two = 0usize;

        for column in 0..WIDTH {
            let mut pieces_above = false;
            for row in 0..HEIGHT {
                match grid[row][column] {
                    Some(Player::One) => {
                        pieces_above = true;
                        player_one += 1;
                    }
                    Some(Player::Two) => {
                        pieces_above = true;
                        player_two += 1;
                    }
                    None => {
                        if pieces_above {
                            // the cell directly above this hole holds a piece
                            return Err(InvalidGrid {
                                row: row - 1,
                                column,
                            });
                        }
                    }
                }
            }
        }

        let to_move = if player_one == player_two {
            Player::One
        } else {
            Player::Two
        };

        Ok(Self {
            grid,
            to_move,
            num_moves: player_one + player_two,
        })
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Player> {
        self.grid[row][column]
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// True iff the column exists and its top cell is empty. No side effects.
    pub fn is_legal_move(&self, column: usize) -> bool {
        column < WIDTH && self.grid[0][column].is_none()
    }

    /// The playable columns in ascending order; empty when the board is full
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&c| self.is_legal_move(c)).collect()
    }

    /// Drops the current player's piece into `column`
    ///
    /// The piece lands in the lowest empty cell, the move counter advances
    /// and the turn passes to the other player. Committed in place; callers
    /// needing rollback must clone beforehand. The board does not block
    /// moves after a win, terminality is the caller's check.
    pub fn apply_move(&mut self, column: usize) -> Result<(), IllegalMove> {
        if column >= WIDTH {
            return Err(IllegalMove::OutOfRange(column));
        }
        if self.grid[0][column].is_some() {
            return Err(IllegalMove::ColumnFull(column));
        }

        self.drop_piece(column);
        Ok(())
    }

    // Unchecked gravity drop; callers must have validated the column.
    fn drop_piece(&mut self, column: usize) {
        for row in (0..HEIGHT).rev() {
            if self.grid[row][column].is_none() {
                self.grid[row][column] = Some(self.to_move);
                break;
            }
        }
        self.num_moves += 1;
        self.to_move = self.to_move.other();
    }

    /// Clones the board and applies `column` to the copy
    pub fn child(&self, column: usize) -> Result<Board, IllegalMove> {
        let mut next = self.clone();
        next.apply_move(column)?;
        Ok(next)
    }

    /// The legal moves in ascending order, each paired with the board it
    /// leads to; empty when the board is full
    pub fn children(&self) -> Vec<(usize, Board)> {
        self.legal_moves()
            .into_iter()
            .map(|column| {
                let mut next = self.clone();
                next.drop_piece(column);
                (column, next)
            })
            .collect()
    }

    /// Scans the board for a decided outcome
    ///
    /// Both players are checked in all four directions on every call: grids
    /// built with [`from_grid`] may be hypothetical, so the scan must not
    /// assume at most one player holds an alignment. A full board with no
    /// alignment is a draw.
    ///
    /// [`from_grid`]: Board::from_grid
    pub fn winner(&self) -> Status {
        for player in [Player::One, Player::Two] {
            if self.has_alignment(player) {
                return Status::Won(player);
            }
        }
        if self.num_moves == WIDTH * HEIGHT {
            Status::Draw
        } else {
            Status::InProgress
        }
    }

    fn has_alignment(&self, player: Player) -> bool {
        // rightward, downward and the two downward diagonals cover every
        // 4-in-a-row exactly once
        const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                if self.grid[row][column] != Some(player) {
                    continue;
                }
                for (dr, dc) in DIRECTIONS {
                    let end_row = row as isize + 3 * dr;
                    let end_column = column as isize + 3 * dc;
                    if end_row >= HEIGHT as isize || end_column < 0 || end_column >= WIDTH as isize
                    {
                        continue;
                    }
                    if (1..4).all(|i| {
                        let r = (row as isize + i * dr) as usize;
                        let c = (column as isize + i * dc) as usize;
                        self.grid[r][c] == Some(player)
                    }) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Canonical board encoding: the flattened grid read as a base-3 numeral
    ///
    /// Cells are taken row by row from the top-left corner, empty = 0,
    /// player one = 1, player two = 2.
    pub fn board_id(&self) -> u128 {
        let mut id = 0u128;
        for row in &self.grid {
            for cell in row {
                id = id * 3
                    + match cell {
                        None => 0,
                        Some(Player::One) => 1,
                        Some(Player::Two) => 2,
                    };
            }
        }
        id
    }

    /// The left-right mirrored board
    pub fn mirrored(&self) -> Board {
        let mut grid = self.grid;
        for row in grid.iter_mut() {
            row.reverse();
        }
        Board {
            grid,
            to_move: self.to_move,
            num_moves: self.num_moves,
        }
    }

    /// Canonical encoding of the left-right mirrored board
    pub fn mirror_id(&self) -> u128 {
        self.mirrored().board_id()
    }

    /// Decodes a canonical board encoding back into a board
    pub fn from_id(mut id: u128) -> Result<Board, InvalidGrid> {
        let mut grid = [[None; WIDTH]; HEIGHT];
        for row in (0..HEIGHT).rev() {
            for column in (0..WIDTH).rev() {
                grid[row][column] = match id % 3 {
                    0 => None,
                    1 => Some(Player::One),
                    _ => Some(Player::Two),
                };
                id /= 3;
            }
        }
        Self::from_grid(grid)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
