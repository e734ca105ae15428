//! Outcome score deltas

use serde::{Deserialize, Serialize};

use crate::tictactoe::Outcome;

/// Score added to every node on an episode's path, by outcome.
///
/// The deltas are fixed per outcome and not discounted by depth, so a node's
/// score is a plain tally of how outcomes correlated with reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDeltas {
    pub win: i64,
    pub draw: i64,
    pub lose: i64,
}

impl ScoreDeltas {
    /// Delta applied for `outcome`
    pub fn delta(&self, outcome: Outcome) -> i64 {
        match outcome {
            Outcome::Win => self.win,
            Outcome::Draw => self.draw,
            Outcome::Lose => self.lose,
        }
    }
}

impl Default for ScoreDeltas {
    fn default() -> Self {
        ScoreDeltas {
            win: 2,
            draw: 0,
            lose: -4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deltas() {
        let deltas = ScoreDeltas::default();
        assert_eq!(deltas.delta(Outcome::Win), 2);
        assert_eq!(deltas.delta(Outcome::Draw), 0);
        assert_eq!(deltas.delta(Outcome::Lose), -4);
    }
}
