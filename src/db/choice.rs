use color_eyre::Result;

use super::models::Choice;
use super::Db;

impl Db {
    /// Choices of a question in the order they were created.
    pub async fn choices(&self, question_id: i64) -> Result<Vec<Choice>> {
        let choices = sqlx::query_as::<_, Choice>(
            "SELECT id, question_id, text, sum_points FROM choice WHERE question_id = ? ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    pub async fn get_choice(&self, choice_id: i64) -> Result<Option<Choice>> {
        let choice = sqlx::query_as::<_, Choice>(
            "SELECT id, question_id, text, sum_points FROM choice WHERE id = ?",
        )
        .bind(choice_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(choice)
    }

    pub async fn create_choice(&self, question_id: i64, text: &str, sum_points: i64) -> Result<i64> {
        let choice_id: i64 = sqlx::query_scalar(
            "INSERT INTO choice (question_id, text, sum_points) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(question_id)
        .bind(text)
        .bind(sum_points)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("choice {choice_id} ({sum_points} pt) added to question {question_id}");
        Ok(choice_id)
    }

    /// Updates the point value, and the text when one is given.
    pub async fn update_choice(
        &self,
        choice_id: i64,
        text: Option<&str>,
        sum_points: i64,
    ) -> Result<()> {
        sqlx::query("UPDATE choice SET text = COALESCE(?, text), sum_points = ? WHERE id = ?")
            .bind(text)
            .bind(sum_points)
            .bind(choice_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("choice {choice_id} updated to {sum_points} pt");
        Ok(())
    }

    pub async fn delete_choice(&self, choice_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM choice_score WHERE choice_id = ?")
            .bind(choice_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM choice WHERE id = ?")
            .bind(choice_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("choice {choice_id} deleted");
        Ok(())
    }
}
