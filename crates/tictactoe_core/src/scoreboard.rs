//! Running win/loss/draw tally for one session.

use super::{Outcome, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Results for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Record {
    /// Games this side won.
    wins: u32,
    /// Games this side lost.
    losses: u32,
    /// Games that ended drawn.
    draws: u32,
}

impl Record {
    /// Total games recorded.
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wins: {} Losses: {} Draws: {}",
            self.wins, self.losses, self.draws
        )
    }
}

/// Per-side records, kept for the lifetime of a session.
///
/// Never reset by a new game and never written to storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    x: Record,
    o: Record,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `side`.
    pub fn record(&self, side: Side) -> &Record {
        match side {
            Side::X => &self.x,
            Side::O => &self.o,
        }
    }

    fn record_mut(&mut self, side: Side) -> &mut Record {
        match side {
            Side::X => &mut self.x,
            Side::O => &mut self.o,
        }
    }

    /// Adds a finished game: a win and a loss, or a draw for both sides.
    ///
    /// `InProgress` is ignored.
    #[instrument(skip(self))]
    pub fn tally(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won(winner) => {
                self.record_mut(winner).wins += 1;
                self.record_mut(winner.opponent()).losses += 1;
            }
            Outcome::Draw => {
                self.x.draws += 1;
                self.o.draws += 1;
            }
            Outcome::InProgress => {
                warn!("Ignoring attempt to tally an unfinished game");
                return;
            }
        }
        debug!(x = %self.x, o = %self.o, "Scoreboard updated");
    }

    /// Number of finished games recorded.
    pub fn games(&self) -> u32 {
        // Every game adds exactly one entry to each side.
        self.x.games()
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "X - {}", self.x)?;
        write!(f, "O - {}", self.o)
    }
}
