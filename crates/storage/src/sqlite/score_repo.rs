use quiz_core::model::{ScoreId, ScoreRecord};

use super::mapping::{map_score_row, score_id_from_i64};
use super::SqliteRepository;
use crate::changes::TableChange;
use crate::repository::{NewScoreRecord, ScoreRepository, StorageError};

#[async_trait::async_trait]
impl ScoreRepository for SqliteRepository {
    async fn append_score(&self, record: &NewScoreRecord) -> Result<ScoreId, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO scores (player_name, score, completed_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(record.player_name.as_str())
        .bind(i64::from(record.score))
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let id = score_id_from_i64(result.last_insert_rowid())?;
        self.changes.publish(TableChange::Scores);
        Ok(id)
    }

    async fn list_ranking(&self, limit: u32) -> Result<Vec<ScoreRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, player_name, score, completed_at
            FROM scores
            ORDER BY score DESC, completed_at ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(map_score_row(&row)?);
        }
        Ok(records)
    }
}
