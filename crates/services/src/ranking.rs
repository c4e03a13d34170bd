use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use quiz_core::model::ScoreRecord;
use storage::repository::ScoreRepository;

use crate::error::RankingError;

/// Leaderboard reads and the current-player highlight heuristic.
#[derive(Clone)]
pub struct RankingService {
    scores: Arc<dyn ScoreRepository>,
}

/// Score distance below which two entries count as "the same run".
const SCORE_TOLERANCE: u32 = 10;

/// How recent an entry must be to count as the run just played.
const RECENCY_WINDOW_SECS: i64 = 60;

impl RankingService {
    #[must_use]
    pub fn new(scores: Arc<dyn ScoreRepository>) -> Self {
        Self { scores }
    }

    /// The leaderboard, descending by score, ascending by completion time
    /// on ties. Refreshed by the caller on every score-table change
    /// signal.
    ///
    /// # Errors
    ///
    /// Returns `RankingError::Storage` when the read fails.
    pub async fn ranking(&self, limit: u32) -> Result<Vec<ScoreRecord>, RankingError> {
        Ok(self.scores.list_ranking(limit).await?)
    }
}

/// Best-effort guess whether a leaderboard row is the round the player
/// just finished. Nothing links a session to its persisted row, so this
/// fuzzy-matches name (case-insensitive, trimmed), score (within a small
/// tolerance), and recency. A heuristic for highlighting only; never use
/// it for identity or authorization decisions.
#[must_use]
pub fn is_current_player(
    record: &ScoreRecord,
    player_name: &str,
    score: u32,
    now: DateTime<Utc>,
) -> bool {
    let name_matches = record
        .player_name
        .as_str()
        .eq_ignore_ascii_case(player_name.trim());
    let score_close = record.score.abs_diff(score) <= SCORE_TOLERANCE;
    let recent = (now - record.completed_at) <= Duration::seconds(RECENCY_WINDOW_SECS)
        && record.completed_at <= now;
    name_matches && score_close && recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{PlayerName, ScoreId};
    use quiz_core::time::fixed_now;

    fn record(name: &str, score: u32, completed_at: DateTime<Utc>) -> ScoreRecord {
        ScoreRecord {
            id: ScoreId::new(1),
            player_name: PlayerName::new(name).unwrap(),
            score,
            completed_at,
        }
    }

    #[test]
    fn highlight_matches_recent_same_name_and_score() {
        let now = fixed_now();
        let entry = record("Solaire", 850, now - Duration::seconds(5));
        assert!(is_current_player(&entry, "solaire", 850, now));
        assert!(is_current_player(&entry, "  Solaire ", 845, now));
    }

    #[test]
    fn highlight_rejects_score_outside_tolerance() {
        let now = fixed_now();
        let entry = record("Solaire", 850, now);
        assert!(!is_current_player(&entry, "Solaire", 861, now));
        assert!(is_current_player(&entry, "Solaire", 860, now));
    }

    #[test]
    fn highlight_rejects_old_entries() {
        let now = fixed_now();
        let entry = record("Solaire", 850, now - Duration::seconds(61));
        assert!(!is_current_player(&entry, "Solaire", 850, now));
    }

    #[test]
    fn highlight_rejects_future_entries() {
        let now = fixed_now();
        let entry = record("Solaire", 850, now + Duration::seconds(5));
        assert!(!is_current_player(&entry, "Solaire", 850, now));
    }

    #[test]
    fn highlight_rejects_different_name() {
        let now = fixed_now();
        let entry = record("Solaire", 850, now);
        assert!(!is_current_player(&entry, "Siegward", 850, now));
    }
}
