//! The self-play statistical learning store
//!
//! Win statistics for board positions observed during self-play, keyed by
//! the canonical base-3 board encoding folded with its left-right mirror so
//! symmetric positions share one record. Probabilities are posterior means
//! assuming a binomial likelihood and a flat prior, so a position seen once
//! never swings to certainty.

use anyhow::Result;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rayon::prelude::*;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::board::{Board, Player, Status};

pub const STORE_PATH: &str = "knowledge.bin";

// games merged into the store between training progress updates
const TRAINING_BATCH: usize = 64;

/// Outcome statistics for one (mirror-folded) board position
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Record {
    pub games: u32,
    pub player_one_wins: u32,
}

impl Record {
    /// Posterior mean win probability for player one
    pub fn player_one_probability(&self) -> f64 {
        (self.player_one_wins as f64 + 1.0) / (self.games as f64 + 2.0)
    }

    pub fn probability(&self, player: Player) -> f64 {
        match player {
            Player::One => self.player_one_probability(),
            Player::Two => 1.0 - self.player_one_probability(),
        }
    }
}

/// The store itself: a map from folded position keys to outcome records
#[derive(Clone, Default)]
pub struct KnowledgeStore {
    records: HashMap<u128, Record>,
}

impl KnowledgeStore {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// The key a position is filed under; a board and its mirror share one
    pub fn position_key(board: &Board) -> u128 {
        board.board_id().min(board.mirror_id())
    }

    pub fn get(&self, board: &Board) -> Option<Record> {
        self.records.get(&Self::position_key(board)).copied()
    }

    /// Win probability for `player`, with even odds for unseen positions
    pub fn probability(&self, board: &Board, player: Player) -> f64 {
        self.get(board)
            .map_or(0.5, |record| record.probability(player))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Columns whose resulting positions carry the highest recorded win
    /// probability for the side to move, ascending; empty iff the board is
    /// full
    pub fn preferred_moves(&self, board: &Board) -> Vec<usize> {
        let to_move = board.to_move();
        let mut best_probability = f64::NEG_INFINITY;
        let mut best = Vec::new();

        for (column, child) in board.children() {
            let probability = self.probability(&child, to_move);
            if probability > best_probability {
                best_probability = probability;
                best.clear();
            }
            if probability == best_probability {
                best.push(column);
            }
        }
        best
    }

    /// Folds one finished game into the statistics
    ///
    /// `positions` are the folded keys of every position the game passed
    /// through. Draws carry no signal and should not be recorded.
    pub fn record_game(&mut self, positions: &[u128], winner: Player) {
        for &position in positions {
            let record = self.records.entry(position).or_default();
            record.games += 1;
            if winner == Player::One {
                record.player_one_wins += 1;
            }
        }
    }

    /// Reads a store previously written by [`save`]
    ///
    /// [`save`]: KnowledgeStore::save
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = BufReader::new(File::open(path)?);

        let len = file.read_u64::<LittleEndian>()?;
        let mut records = HashMap::with_capacity(len as usize);
        for _ in 0..len {
            let key = file.read_u128::<LittleEndian>()?;
            let games = file.read_u32::<LittleEndian>()?;
            let player_one_wins = file.read_u32::<LittleEndian>()?;
            records.insert(
                key,
                Record {
                    games,
                    player_one_wins,
                },
            );
        }
        Ok(Self { records })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);

        file.write_u64::<LittleEndian>(self.records.len() as u64)?;
        for (&key, record) in &self.records {
            file.write_u128::<LittleEndian>(key)?;
            file.write_u32::<LittleEndian>(record.games)?;
            file.write_u32::<LittleEndian>(record.player_one_wins)?;
        }
        Ok(())
    }

    /// Runs `games` self-play games and folds the outcomes into the store
    ///
    /// Games run in parallel batches; every game in a batch reads the store
    /// as it stood when the batch started, so later batches play with what
    /// earlier batches learned.
    pub fn train(&mut self, games: usize) {
        let progress = ProgressBar::new(games as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Self-play: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let mut remaining = games;
        while remaining > 0 {
            let batch = remaining.min(TRAINING_BATCH);

            let snapshot = &*self;
            let results: Vec<_> = (0..batch)
                .into_par_iter()
                .map(|_| snapshot.play_training_game())
                .collect();

            for (positions, outcome) in results {
                // draws update nothing
                if let Status::Won(winner) = outcome {
                    self.record_game(&positions, winner);
                }
            }
            remaining -= batch;
            progress.inc(batch as u64);
        }
        progress.finish();
    }

    // One self-play game guided by the current statistics, random among
    // ties. Returns the visited position keys and the outcome.
    fn play_training_game(&self) -> (Vec<u128>, Status) {
        let mut rng = rand::thread_rng();
        let mut board = Board::new();
        let mut positions = Vec::with_capacity(crate::WIDTH * crate::HEIGHT);

        loop {
            let column = match self.preferred_moves(&board).choose(&mut rng) {
                Some(&column) => column,
                None => return (positions, Status::Draw),
            };
            if board.apply_move(column).is_err() {
                return (positions, Status::Draw);
            }
            positions.push(Self::position_key(&board));

            let status = board.winner();
            if status != Status::InProgress {
                return (positions, status);
            }
        }
    }
}
