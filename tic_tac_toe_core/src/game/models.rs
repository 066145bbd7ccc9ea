#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub symbol: char,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, symbol: char) -> Self {
        Player {
            name: name.into(),
            symbol,
            score: 0,
        }
    }
}

/// Where the game sits in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AwaitingSetup,
    InProgress,
    Finished(GameOver),
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Index into the player pair.
    Won { winner: usize },
    Draw,
}

/// The terminal result of one game, with the text shown to the players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub outcome: Outcome,
    pub message: String,
}

/// What a click on the board did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// Occupied cell, bad index, or no game running. Nothing changed.
    Rejected,
    /// The move stood and the turn passed to player `next`.
    Continue { next: usize },
    GameOver(GameOver),
}

impl MoveResult {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveResult::Rejected)
    }
}
