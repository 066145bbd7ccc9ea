use crate::game::board::Board;
use crate::game::models::{GameOver, MoveResult, Outcome, Phase, Player};
use crate::game::setup::PlayerSetup;
use crate::score_store::{ScoreRecord, ScoreStore, ScoreStoreError};

use tracing::{debug, error, info, warn};

/// Turn order and outcome bookkeeping for one application session.
///
/// Every operation is a state transition that hands back a descriptor; the
/// presentation layer renders from that and from the getters, and never
/// writes into the game directly.
#[derive(Debug)]
pub struct GameState<S: ScoreStore> {
    board: Board,
    players: [Player; 2],
    current_player: usize,
    phase: Phase,
    scores: ScoreRecord,
    store: S,
}

impl<S: ScoreStore> GameState<S> {
    /// Starts a session, reading prior scores from `store`.
    pub fn new(store: S) -> Result<Self, ScoreStoreError> {
        let scores = store.load()?;
        Ok(Self::with_scores(store, scores))
    }

    /// Starts a session even when the stored scores cannot be read.
    pub fn new_or_empty(store: S) -> Self {
        let scores = store.load().unwrap_or_else(|e| {
            warn!("Starting with no prior scores: {}", e);
            ScoreRecord::new()
        });
        Self::with_scores(store, scores)
    }

    fn with_scores(store: S, scores: ScoreRecord) -> Self {
        GameState {
            board: Board::new(),
            players: [Player::new("", ' '), Player::new("", ' ')],
            current_player: 0,
            phase: Phase::AwaitingSetup,
            scores,
            store,
        }
    }

    pub fn setup_players(&mut self, setup: PlayerSetup) {
        if self.phase == Phase::Terminated {
            debug!("Setup ignored: session has ended.");
            return;
        }

        let [(name1, symbol1), (name2, symbol2)] = setup.entries().clone();
        self.players = [Player::new(name1, symbol1), Player::new(name2, symbol2)];
        for player in &mut self.players {
            player.score = self.scores.get(&player.name);
        }

        self.board.reset();
        self.current_player = 0;
        self.phase = Phase::InProgress;

        info!(
            "Players set up: {} ({}) with {} wins vs {} ({}) with {} wins",
            self.players[0].name,
            self.players[0].symbol,
            self.players[0].score,
            self.players[1].name,
            self.players[1].symbol,
            self.players[1].score
        );
    }

    /// Plays the current player's symbol at `index`.
    ///
    /// Win is checked before draw, and the turn only passes when neither
    /// ended the game.
    pub fn make_move(&mut self, index: usize) -> MoveResult {
        if self.phase != Phase::InProgress {
            debug!("Move rejected: no game in progress.");
            return MoveResult::Rejected;
        }

        let symbol = self.players[self.current_player].symbol;
        if !self.board.place(index, symbol) {
            return MoveResult::Rejected;
        }

        if self.board.check_win() {
            let winner = self.current_player;
            self.players[winner].score = self.players[winner].score.saturating_add(1);
            self.persist_scores();

            let message = format!(
                "Congratulations {}, you win!{}",
                self.players[winner].name,
                self.score_summary()
            );
            info!(
                "Game over: {} wins. Score now {}.",
                self.players[winner].name, self.players[winner].score
            );
            self.finish(Outcome::Won { winner }, message)
        } else if self.board.check_draw() {
            info!("Game over: It's a draw.");
            let message = format!("It's a draw!{}", self.score_summary());
            self.finish(Outcome::Draw, message)
        } else {
            self.current_player = 1 - self.current_player;
            debug!(
                "Turn switched: Now it's {}'s turn.",
                self.players[self.current_player].name
            );
            MoveResult::Continue {
                next: self.current_player,
            }
        }
    }

    /// Answers the play-again prompt after a finished game.
    pub fn resolve_outcome(&mut self, play_again: bool) {
        if !matches!(self.phase, Phase::Finished(_)) {
            debug!("No finished game to resolve.");
            return;
        }

        if play_again {
            self.board.reset();
            self.current_player = 0;
            self.phase = Phase::InProgress;
            debug!("Board reset for a new game.");
        } else {
            self.phase = Phase::Terminated;
            info!("Players chose not to play again.");
        }
    }

    /// Application exit: ends the session and wipes the persisted scores.
    pub fn shutdown(&mut self) {
        self.phase = Phase::Terminated;
        if let Err(e) = self.store.clear() {
            error!("Failed to delete scores on exit: {}", e);
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn scores(&self) -> &ScoreRecord {
        &self.scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `"<name>'s turn (<symbol>)"` for the player to move.
    pub fn turn_status(&self) -> String {
        let player = self.current_player();
        format!("{}'s turn ({})", player.name, player.symbol)
    }

    /// `"<p1>: <s1>  |  <p2>: <s2>"`
    pub fn scoreboard(&self) -> String {
        let [p1, p2] = &self.players;
        format!("{}: {}  |  {}: {}", p1.name, p1.score, p2.name, p2.score)
    }

    fn score_summary(&self) -> String {
        let [p1, p2] = &self.players;
        format!(
            "\nCurrent Scores:\n{}: {}\n{}: {}",
            p1.name, p1.score, p2.name, p2.score
        )
    }

    fn finish(&mut self, outcome: Outcome, message: String) -> MoveResult {
        let game_over = GameOver { outcome, message };
        self.phase = Phase::Finished(game_over.clone());
        MoveResult::GameOver(game_over)
    }

    // Both players' scores are folded into everything loaded earlier, and
    // the whole record is written back.
    fn persist_scores(&mut self) {
        for player in &self.players {
            self.scores.set(player.name.clone(), player.score);
        }
        if let Err(e) = self.store.save(&self.scores) {
            error!("Failed to save scores: {}", e);
        }
    }
}
