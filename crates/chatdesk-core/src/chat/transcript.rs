//! Append-only transcript log.
//!
//! Insertion order is read order: [`TranscriptLog::to_vec`] always yields
//! turns exactly in the order they were appended, whatever container backs
//! the log.

use chatdesk_types::chat::Turn;

#[derive(Debug, Clone, Default)]
pub struct TranscriptLog {
    turns: Vec<Turn>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end. There is no way to remove or rewrite one.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Copy of the log in insertion order.
    pub fn to_vec(&self) -> Vec<Turn> {
        self.turns.clone()
    }
}
