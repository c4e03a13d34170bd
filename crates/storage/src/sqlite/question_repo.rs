use quiz_core::model::{Question, QuestionId, ValidatedQuestion};

use super::mapping::{map_question_row, options_to_json, question_id_from_i64, question_id_to_i64};
use super::SqliteRepository;
use crate::changes::TableChange;
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, prompt, options, correct_index, category, difficulty, souls, order_position
            FROM questions
            ORDER BY order_position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        Ok(questions)
    }

    async fn insert_question(
        &self,
        body: &ValidatedQuestion,
        order_position: u32,
    ) -> Result<QuestionId, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO questions (
                prompt, options, correct_index, category, difficulty, souls, order_position
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(body.prompt())
        .bind(options_to_json(body.options())?)
        .bind(
            i64::try_from(body.correct_index())
                .map_err(|_| StorageError::Serialization("correct_index overflow".into()))?,
        )
        .bind(body.category().as_str())
        .bind(i64::from(body.difficulty().value()))
        .bind(i64::from(body.souls().value()))
        .bind(i64::from(order_position))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let id = question_id_from_i64(result.last_insert_rowid())?;
        self.changes.publish(TableChange::Questions);
        Ok(id)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        body: &ValidatedQuestion,
    ) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            UPDATE questions SET
                prompt = ?2,
                options = ?3,
                correct_index = ?4,
                category = ?5,
                difficulty = ?6,
                souls = ?7
            WHERE id = ?1
            ",
        )
        .bind(question_id_to_i64(id)?)
        .bind(body.prompt())
        .bind(options_to_json(body.options())?)
        .bind(
            i64::try_from(body.correct_index())
                .map_err(|_| StorageError::Serialization("correct_index overflow".into()))?,
        )
        .bind(body.category().as_str())
        .bind(i64::from(body.difficulty().value()))
        .bind(i64::from(body.souls().value()))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        self.changes.publish(TableChange::Questions);
        Ok(())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(question_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        self.changes.publish(TableChange::Questions);
        Ok(())
    }

    async fn max_order_position(&self) -> Result<u32, StorageError> {
        let row: (Option<i64>,) =
            sqlx::query_as("SELECT MAX(order_position) FROM questions")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row.0 {
            None => Ok(0),
            Some(max) => u32::try_from(max)
                .map_err(|_| StorageError::Serialization(format!("invalid order_position: {max}"))),
        }
    }
}
