//! Validation of the player setup form.

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupIssue {
    #[error("Player {player} name must be one or more letters")]
    InvalidName { player: usize },
    #[error("Player {player} symbol must be a single letter")]
    InvalidSymbol { player: usize },
    #[error("Both players chose the symbol {0}")]
    DuplicateSymbol(char),
}

/// Every reason a setup submission was refused, reported as one message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please enter valid names (letters only) and symbols (different single letters).")]
pub struct SetupError {
    pub issues: Vec<SetupIssue>,
}

/// Names and symbols for both players, already validated.
///
/// Only [`PlayerSetup::parse`] builds one, so a game can never start with
/// a blank name or clashing symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSetup {
    entries: [(String, char); 2],
}

impl PlayerSetup {
    /// Accepts the raw form fields. Symbols are uppercased before they are
    /// checked, so `x` and `X` clash.
    pub fn parse(
        name1: &str,
        symbol1: &str,
        name2: &str,
        symbol2: &str,
    ) -> Result<Self, SetupError> {
        let mut issues = Vec::new();

        let names = [name1, name2];
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() || !name.chars().all(char::is_alphabetic) {
                issues.push(SetupIssue::InvalidName { player: i + 1 });
            }
        }

        let mut symbols = [None, None];
        for (i, raw) in [symbol1, symbol2].iter().enumerate() {
            symbols[i] = single_letter(raw);
            if symbols[i].is_none() {
                issues.push(SetupIssue::InvalidSymbol { player: i + 1 });
            }
        }

        if let [Some(a), Some(b)] = symbols {
            if a == b {
                issues.push(SetupIssue::DuplicateSymbol(a));
            }
        }

        match symbols {
            [Some(a), Some(b)] if issues.is_empty() => Ok(PlayerSetup {
                entries: [(name1.to_string(), a), (name2.to_string(), b)],
            }),
            _ => {
                debug!("Setup rejected: {:?}", issues);
                Err(SetupError { issues })
            }
        }
    }

    pub fn entries(&self) -> &[(String, char); 2] {
        &self.entries
    }
}

fn single_letter(raw: &str) -> Option<char> {
    let upper = raw.to_uppercase();
    let mut chars = upper.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Some(c),
        _ => None,
    }
}
