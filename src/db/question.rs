use color_eyre::Result;

use super::models::{Question, QuestionWithChoices};
use super::Db;
use crate::models::MoveDirection;

const QUESTION_COLUMNS: &str =
    r#"id, quiz_id, text, COALESCE("order", 0) AS "order", multiple"#;

impl Db {
    /// Questions of a quiz in display order: `order`, then id.
    pub async fn questions(&self, quiz_id: i64) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            r#"SELECT {QUESTION_COLUMNS} FROM question WHERE quiz_id = ? ORDER BY COALESCE("order", 0), id"#
        ))
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    /// Questions in display order, each with its choices ordered by id.
    pub async fn questions_with_choices(&self, quiz_id: i64) -> Result<Vec<QuestionWithChoices>> {
        let questions = self.questions(quiz_id).await?;
        let mut out = Vec::with_capacity(questions.len());

        for question in questions {
            let choices = self.choices(question.id).await?;
            out.push(QuestionWithChoices { question, choices });
        }

        Ok(out)
    }

    pub async fn get_question(&self, question_id: i64) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM question WHERE id = ?"
        ))
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    /// Appends a single-select question after the current last one.
    pub async fn create_question(&self, quiz_id: i64, text: &str) -> Result<i64> {
        let question_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO question (quiz_id, text, "order", multiple)
            VALUES (?1, ?2, (SELECT COALESCE(MAX("order"), -1) + 1 FROM question WHERE quiz_id = ?1), 0)
            RETURNING id
            "#,
        )
        .bind(quiz_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("question {question_id} appended to quiz {quiz_id}");
        Ok(question_id)
    }

    /// Inserts a question at an explicit position; used when seeding.
    pub async fn insert_question(
        &self,
        quiz_id: i64,
        text: &str,
        order: i64,
        multiple: bool,
    ) -> Result<i64> {
        let question_id: i64 = sqlx::query_scalar(
            r#"INSERT INTO question (quiz_id, text, "order", multiple) VALUES (?, ?, ?, ?) RETURNING id"#,
        )
        .bind(quiz_id)
        .bind(text)
        .bind(order)
        .bind(multiple)
        .fetch_one(&self.pool)
        .await?;

        Ok(question_id)
    }

    pub async fn update_question(&self, question_id: i64, text: &str, multiple: bool) -> Result<()> {
        sqlx::query("UPDATE question SET text = ?, multiple = ? WHERE id = ?")
            .bind(text)
            .bind(multiple)
            .bind(question_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("question {question_id} updated (multiple={multiple})");
        Ok(())
    }

    pub async fn delete_question(&self, question_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM choice_score WHERE choice_id IN (SELECT id FROM choice WHERE question_id = ?)",
        )
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM choice WHERE question_id = ?")
            .bind(question_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM question WHERE id = ?")
            .bind(question_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("question {question_id} deleted");
        Ok(())
    }

    /// Renumbers the quiz's questions to `0..n` and swaps `question_id` with
    /// its neighbour. Moving past either end leaves the order unchanged.
    pub async fn move_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        direction: MoveDirection,
    ) -> Result<()> {
        let ids: Vec<i64> = self
            .questions(quiz_id)
            .await?
            .into_iter()
            .map(|q| q.id)
            .collect();

        let Some(ids) = reorder(ids, question_id, direction) else {
            tracing::warn!("question {question_id} not found in quiz {quiz_id}");
            return Ok(());
        };

        let mut tx = self.pool.begin().await?;
        for (position, id) in ids.iter().enumerate() {
            sqlx::query(r#"UPDATE question SET "order" = ? WHERE id = ?"#)
                .bind(position as i64)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::info!("question {question_id} moved {direction:?}");
        Ok(())
    }
}

/// New display order for `ids` after moving `target` one step. `None` when
/// `target` is not among `ids`.
fn reorder(mut ids: Vec<i64>, target: i64, direction: MoveDirection) -> Option<Vec<i64>> {
    let idx = ids.iter().position(|&id| id == target)?;

    match direction {
        MoveDirection::Up if idx > 0 => ids.swap(idx, idx - 1),
        MoveDirection::Down if idx + 1 < ids.len() => ids.swap(idx, idx + 1),
        _ => {}
    }

    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_swaps_with_neighbour() {
        assert_eq!(
            reorder(vec![1, 2, 3], 2, MoveDirection::Up),
            Some(vec![2, 1, 3])
        );
        assert_eq!(
            reorder(vec![1, 2, 3], 2, MoveDirection::Down),
            Some(vec![1, 3, 2])
        );
    }

    #[test]
    fn reorder_is_noop_at_edges() {
        assert_eq!(
            reorder(vec![1, 2, 3], 1, MoveDirection::Up),
            Some(vec![1, 2, 3])
        );
        assert_eq!(
            reorder(vec![1, 2, 3], 3, MoveDirection::Down),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn reorder_unknown_target() {
        assert_eq!(reorder(vec![1, 2], 9, MoveDirection::Up), None);
    }
}
