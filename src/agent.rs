//! Computer opponents: anything that can pick a column to play

use rand::seq::SliceRandom;

use crate::board::Board;
use crate::knowledge::KnowledgeStore;
use crate::search::Search;

/// A move source for one seat at the table
pub trait Agent {
    /// Chooses a column to play on `board`
    ///
    /// `None` means no legal move remains (the game is drawn), never a
    /// failure to decide.
    fn choose_move(&mut self, board: &Board) -> Option<usize>;
}

/// Picks uniformly at random among the legal moves
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn choose_move(&mut self, board: &Board) -> Option<usize> {
        board.legal_moves().choose(&mut rand::thread_rng()).copied()
    }
}

/// Plays the move preferred by a depth-limited alpha-beta search
pub struct MinimaxAgent {
    depth: u32,
    search: Search,
}

impl MinimaxAgent {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            search: Search::new(),
        }
    }

    /// Total nodes searched by this agent across all of its moves
    pub fn node_count(&self) -> usize {
        self.search.node_count
    }
}

impl Agent for MinimaxAgent {
    fn choose_move(&mut self, board: &Board) -> Option<usize> {
        self.search.best_move(board, self.depth)
    }
}

/// Chooses the child position with the best recorded self-play win
/// probability, treating unseen positions as even odds
pub struct KnowledgeAgent {
    store: KnowledgeStore,
}

impl KnowledgeAgent {
    pub fn new(store: KnowledgeStore) -> Self {
        Self { store }
    }
}

impl Agent for KnowledgeAgent {
    fn choose_move(&mut self, board: &Board) -> Option<usize> {
        self.store
            .preferred_moves(board)
            .choose(&mut rand::thread_rng())
            .copied()
    }
}
