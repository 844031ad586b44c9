use color_eyre::Result;

use super::models::{Quiz, QuizSummary};
use super::Db;
use crate::models::QuizSettings;

impl Db {
    pub async fn quizzes(&self) -> Result<Vec<QuizSummary>> {
        let quizzes = sqlx::query_as::<_, QuizSummary>(
            r#"
            SELECT
              quiz.id AS id,
              quiz.title AS title,
              quiz.description AS description,
              quiz.image_url AS image_url,
              COUNT(question.id) AS question_count
            FROM
              quiz
              LEFT JOIN question ON question.quiz_id = quiz.id
            GROUP BY
              quiz.id
            ORDER BY
              quiz.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    pub async fn get_quiz(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, title, description, display_mode, choice_mode, image_url, choice_style
            FROM quiz
            WHERE id = ?
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }

    pub async fn find_quiz_by_title(&self, title: &str) -> Result<Option<i64>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM quiz WHERE title = ? LIMIT 1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }

    pub async fn create_quiz(&self, title: &str, description: &str) -> Result<i64> {
        let quiz_id: i64 =
            sqlx::query_scalar("INSERT INTO quiz (title, description) VALUES (?, ?) RETURNING id")
                .bind(title)
                .bind(description)
                .fetch_one(&self.pool)
                .await?;

        tracing::info!("new quiz created with id: {quiz_id}");
        Ok(quiz_id)
    }

    pub async fn update_quiz(&self, quiz_id: i64, settings: &QuizSettings) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE quiz
            SET title = ?, description = ?, display_mode = ?, choice_mode = ?, choice_style = ?
            WHERE id = ?
            "#,
        )
        .bind(&settings.title)
        .bind(&settings.description)
        .bind(settings.display_mode.as_str())
        .bind(settings.choice_mode.as_str())
        .bind(settings.choice_style.as_str())
        .bind(quiz_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("quiz updated with id: {quiz_id}");
        Ok(())
    }

    pub async fn set_quiz_image(&self, quiz_id: i64, image_url: Option<&str>) -> Result<()> {
        sqlx::query("UPDATE quiz SET image_url = ? WHERE id = ?")
            .bind(image_url)
            .bind(quiz_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("quiz image for id {quiz_id} set to {image_url:?}");
        Ok(())
    }

    /// Removes the quiz and everything it owns. Children are deleted
    /// explicitly because tables from older releases lack `ON DELETE CASCADE`.
    pub async fn delete_quiz(&self, quiz_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM choice_score WHERE choice_id IN (
                SELECT choice.id FROM choice
                JOIN question ON question.id = choice.question_id
                WHERE question.quiz_id = ?
            )
            "#,
        )
        .bind(quiz_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM choice WHERE question_id IN (SELECT id FROM question WHERE quiz_id = ?)",
        )
        .bind(quiz_id)
        .execute(&mut *tx)
        .await?;

        for table in ["question", "result", "trait"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE quiz_id = ?"))
                .bind(quiz_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM quiz WHERE id = ?")
            .bind(quiz_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("quiz deleted with id: {quiz_id}");
        Ok(())
    }
}
