use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::ScoreId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerNameError {
    #[error("player name cannot be empty")]
    Empty,

    #[error("player name is too long ({len} > {max})", max = PlayerName::MAX_LEN)]
    TooLong { len: usize },
}

/// Validated display name for a player. Free text, trimmed, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    pub const MAX_LEN: usize = 64;

    /// # Errors
    ///
    /// Returns `PlayerNameError::Empty` for empty or whitespace-only input
    /// and `PlayerNameError::TooLong` past `MAX_LEN` characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, PlayerNameError> {
        let trimmed = raw.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(PlayerNameError::Empty);
        }
        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(PlayerNameError::TooLong { len });
        }
        Ok(Self(trimmed))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One appended leaderboard entry. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub id: ScoreId,
    pub player_name: PlayerName,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_name_trims_whitespace() {
        let name = PlayerName::new("  Siegward  ").unwrap();
        assert_eq!(name.as_str(), "Siegward");
    }

    #[test]
    fn player_name_rejects_blank() {
        assert_eq!(PlayerName::new("   ").unwrap_err(), PlayerNameError::Empty);
        assert_eq!(PlayerName::new("").unwrap_err(), PlayerNameError::Empty);
    }

    #[test]
    fn player_name_rejects_overlong() {
        let raw = "x".repeat(PlayerName::MAX_LEN + 1);
        assert!(matches!(
            PlayerName::new(raw),
            Err(PlayerNameError::TooLong { .. })
        ));
    }
}
