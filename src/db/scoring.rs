use color_eyre::Result;
use sqlx::{QueryBuilder, Sqlite};

use super::Db;

impl Db {
    /// Point values of the choices among `choice_ids` that exist. Ids with no
    /// matching row contribute nothing.
    pub async fn choice_points(&self, choice_ids: &[i64]) -> Result<Vec<i64>> {
        if choice_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT sum_points FROM choice WHERE id IN (");
        let mut ids = query.separated(", ");
        for id in choice_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");

        let points: Vec<i64> = query
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await?;

        Ok(points)
    }
}
