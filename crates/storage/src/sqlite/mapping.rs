use quiz_core::model::{
    Category, OPTION_COUNT, PlayerName, Question, QuestionId, ScoreId, ScoreRecord,
};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("question_id overflow".into()))
}

pub(crate) fn score_id_from_i64(v: i64) -> Result<ScoreId, StorageError> {
    Ok(ScoreId::new(i64_to_u64("score_id", v)?))
}

/// The options column holds a JSON array of exactly four strings, matching
/// the remote table shape the admin console writes.
pub(crate) fn options_to_json(options: &[String; OPTION_COUNT]) -> Result<String, StorageError> {
    serde_json::to_string(options).map_err(ser)
}

pub(crate) fn options_from_json(raw: &str) -> Result<[String; OPTION_COUNT], StorageError> {
    let parsed: Vec<String> = serde_json::from_str(raw).map_err(ser)?;
    let len = parsed.len();
    parsed
        .try_into()
        .map_err(|_| StorageError::Serialization(format!("expected {OPTION_COUNT} options, got {len}")))
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let correct_index_i64: i64 = row.try_get("correct_index").map_err(ser)?;
    let correct_index = usize::try_from(correct_index_i64).map_err(|_| {
        StorageError::Serialization(format!("invalid correct_index: {correct_index_i64}"))
    })?;

    let category_str: String = row.try_get("category").map_err(ser)?;
    let category = Category::parse(&category_str).map_err(ser)?;

    let difficulty_i64: i64 = row.try_get("difficulty").map_err(ser)?;
    let difficulty = u8::try_from(difficulty_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid difficulty: {difficulty_i64}")))?;

    let souls_i64: i64 = row.try_get("souls").map_err(ser)?;
    let souls = u32::try_from(souls_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid souls: {souls_i64}")))?;

    let position_i64: i64 = row.try_get("order_position").map_err(ser)?;
    let order_position = u32::try_from(position_i64).map_err(|_| {
        StorageError::Serialization(format!("invalid order_position: {position_i64}"))
    })?;

    Question::from_persisted(
        question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("prompt").map_err(ser)?,
        options_from_json(row.try_get::<String, _>("options").map_err(ser)?.as_str())?,
        correct_index,
        category,
        difficulty,
        souls,
        order_position,
    )
    .map_err(ser)
}

pub(crate) fn map_score_row(row: &sqlx::sqlite::SqliteRow) -> Result<ScoreRecord, StorageError> {
    let score_i64: i64 = row.try_get("score").map_err(ser)?;
    let score = u32::try_from(score_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid score: {score_i64}")))?;

    Ok(ScoreRecord {
        id: score_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        player_name: PlayerName::new(row.try_get::<String, _>("player_name").map_err(ser)?)
            .map_err(ser)?,
        score,
        completed_at: row.try_get("completed_at").map_err(ser)?,
    })
}
