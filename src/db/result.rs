use color_eyre::Result;

use super::models::ResultBand;
use super::Db;
use crate::models::ResultForm;

const RESULT_COLUMNS: &str =
    "id, quiz_id, title, description, min_total, max_total, winning_trait_id";

impl Db {
    /// Results of a quiz in insertion order. The resolver's first-match rule
    /// depends on this order.
    pub async fn results(&self, quiz_id: i64) -> Result<Vec<ResultBand>> {
        let results = sqlx::query_as::<_, ResultBand>(&format!(
            "SELECT {RESULT_COLUMNS} FROM result WHERE quiz_id = ? ORDER BY id"
        ))
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    pub async fn get_result(&self, result_id: i64) -> Result<Option<ResultBand>> {
        let result = sqlx::query_as::<_, ResultBand>(&format!(
            "SELECT {RESULT_COLUMNS} FROM result WHERE id = ?"
        ))
        .bind(result_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn create_result(&self, quiz_id: i64, form: &ResultForm) -> Result<i64> {
        let result_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO result (quiz_id, title, description, min_total, max_total)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(quiz_id)
        .bind(&form.title)
        .bind(&form.description)
        .bind(form.min_total)
        .bind(form.max_total)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            "result {result_id} added to quiz {quiz_id} with band {:?}..={:?}",
            form.min_total,
            form.max_total
        );
        Ok(result_id)
    }

    pub async fn update_result(&self, result_id: i64, form: &ResultForm) -> Result<()> {
        sqlx::query(
            "UPDATE result SET title = ?, description = ?, min_total = ?, max_total = ? WHERE id = ?",
        )
        .bind(&form.title)
        .bind(&form.description)
        .bind(form.min_total)
        .bind(form.max_total)
        .bind(result_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("result {result_id} updated");
        Ok(())
    }

    pub async fn delete_result(&self, result_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM result WHERE id = ?")
            .bind(result_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("result {result_id} deleted");
        Ok(())
    }
}
