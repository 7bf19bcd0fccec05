//! Expected-number state machine.
//!
//! `expected` always equals `score + 1`: the only mutation is a successful
//! `try_advance`, which moves both by one. Wrong candidates are free.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    expected: u32,
    score: u32,
}

impl SequenceState {
    pub fn new() -> Self {
        Self {
            expected: 1,
            score: 0,
        }
    }

    /// The number the player has to find next.
    pub fn expected_number(&self) -> u32 {
        self.expected
    }

    /// Correct matches so far ("length").
    pub fn current_score(&self) -> u32 {
        self.score
    }

    /// Advance when `candidate` is the expected number. Anything else is a no-op
    /// returning `false`.
    pub fn try_advance(&mut self, candidate: u32) -> bool {
        if candidate != self.expected {
            return false;
        }
        self.score += 1;
        self.expected += 1;
        true
    }

    /// Back to a fresh game.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn instruction_text(&self) -> String {
        format!("Find the number: {}", self.expected)
    }

    pub fn score_text(&self) -> String {
        format!("Length: {}", self.score)
    }
}

impl Default for SequenceState {
    fn default() -> Self {
        Self::new()
    }
}
