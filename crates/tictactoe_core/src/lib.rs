//! Pure tic-tac-toe game logic with an unbeatable automated opponent.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid; placements never overwrite a mark
//! - **Rules**: stateless win/draw classification
//! - **Search**: exhaustive minimax choosing optimal moves
//! - **Session**: turn order, automated replies and a running scoreboard
//!
//! Nothing here performs I/O. A presentation layer drives a [`Session`]
//! and renders the [`Snapshot`] it hands back.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameMode, MoveResult, Outcome, Session};
//!
//! let mut session = Session::new(GameMode::PlayerVsAutomated);
//! let result = session.submit_move(1, 1).expect("engine fault");
//! assert_eq!(result, MoveResult::Accepted(Outcome::InProgress));
//! // The automated player has already answered.
//! assert!(session.last_reply().is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod position;
pub mod rules;
mod scoreboard;
pub mod search;
mod session;
mod types;

pub use board::Board;
pub use error::{BoardError, EngineError, ParseBoardError, SearchError};
pub use position::Position;
pub use rules::evaluate;
pub use scoreboard::{Record, Scoreboard};
pub use search::{SearchResult, best_move};
pub use session::{Move, MoveResult, Phase, RejectReason, Session, Snapshot, new_session};
pub use types::{Cell, GameMode, Outcome, Side};
