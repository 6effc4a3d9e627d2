// =============================================================================
// Vote Tally — unweighted majority over the indicator votes
// =============================================================================
//
// decision = BUY if up > down, SELL if down > up, NEUTRAL otherwise.
// Every indicator counts once; there is no confidence weighting.

use serde::{Deserialize, Serialize};

use crate::types::{Decision, Vote};

/// Vote counts and the derived decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSummary {
    pub up_votes: usize,
    pub down_votes: usize,
    pub neutral_votes: usize,
    pub decision: Decision,
}

impl VoteSummary {
    /// Tally a set of votes.
    pub fn from_votes<I>(votes: I) -> Self
    where
        I: IntoIterator<Item = Vote>,
    {
        let mut total = 0usize;
        let mut up = 0usize;
        let mut down = 0usize;
        for vote in votes {
            total += 1;
            match vote {
                Vote::Up => up += 1,
                Vote::Down => down += 1,
                Vote::Neutral => {}
            }
        }

        Self {
            up_votes: up,
            down_votes: down,
            neutral_votes: total - up - down,
            decision: decide(up, down),
        }
    }

    /// Net directional agreement, `|up - down|`.
    pub fn clarity(&self) -> usize {
        self.up_votes.abs_diff(self.down_votes)
    }
}

/// Majority rule with ties resolving to NEUTRAL.
pub fn decide(up: usize, down: usize) -> Decision {
    use std::cmp::Ordering;
    match up.cmp(&down) {
        Ordering::Greater => Decision::Buy,
        Ordering::Less => Decision::Sell,
        Ordering::Equal => Decision::Neutral,
    }
}
