//! Rules, turn order and score keeping for two-player tic-tac-toe.
//!
//! Nothing here knows about a window or a terminal. A front end builds a
//! [`PlayerSetup`] from its form, then drives a [`GameState`] with
//! `setup_players`, `make_move`, `resolve_outcome` and `shutdown`, and
//! renders whatever comes back.

pub mod game;
pub mod score_store;

pub use game::board::{Board, CELL_COUNT, TRIPLES};
pub use game::models::{GameOver, MoveResult, Outcome, Phase, Player};
pub use game::setup::{PlayerSetup, SetupError, SetupIssue};
pub use game::state::GameState;
pub use score_store::{JsonScoreStore, ScoreRecord, ScoreStore, ScoreStoreError};
