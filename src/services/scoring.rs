use color_eyre::Result;

use crate::db::{Db, ResultBand};
use crate::models::SelectedChoices;

// ---------------------------------------------------------------------------
// ScoringRepository trait (the reads scoring needs, nothing more)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait ScoringRepository: Send + Sync {
    /// Points of every existing choice among `choice_ids`.
    fn choice_points(
        &self,
        choice_ids: &[i64],
    ) -> impl std::future::Future<Output = Result<Vec<i64>>> + Send;

    /// Results of a quiz in insertion order.
    fn results(
        &self,
        quiz_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ResultBand>>> + Send;
}

impl ScoringRepository for Db {
    async fn choice_points(&self, choice_ids: &[i64]) -> Result<Vec<i64>> {
        Db::choice_points(self, choice_ids).await
    }

    async fn results(&self, quiz_id: i64) -> Result<Vec<ResultBand>> {
        Db::results(self, quiz_id).await
    }
}

// ---------------------------------------------------------------------------
// Band matching
// ---------------------------------------------------------------------------

impl ResultBand {
    /// Inclusive on both ends; a missing bound does not limit that side.
    pub fn contains(&self, total: i64) -> bool {
        self.min_total.is_none_or(|min| min <= total)
            && self.max_total.is_none_or(|max| total <= max)
    }
}

/// The first band, in the given order, that contains `total`. Overlapping
/// bands are not an error: the earlier one wins.
pub fn pick_band<'a, I>(bands: I, total: i64) -> Option<&'a ResultBand>
where
    I: IntoIterator<Item = &'a ResultBand>,
{
    bands.into_iter().find(|band| band.contains(total))
}

/// What a submission scored and which result it landed in, if any.
#[derive(Debug)]
pub struct Outcome {
    pub total: i64,
    pub result: Option<ResultBand>,
}

// ---------------------------------------------------------------------------
// ScoringService
// ---------------------------------------------------------------------------

pub struct ScoringService<R: ScoringRepository = Db> {
    repo: R,
}

impl<R: ScoringRepository + Clone> Clone for ScoringService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: ScoringRepository> ScoringService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Sum of `sum_points` over the selected choices that exist.
    pub async fn aggregate(&self, selected: &SelectedChoices) -> Result<i64> {
        if selected.is_empty() {
            return Ok(0);
        }

        let points = self.repo.choice_points(&selected.ids()).await?;
        if points.len() < selected.len() {
            tracing::debug!(
                "{} of {} selected choice(s) did not resolve",
                selected.len() - points.len(),
                selected.len()
            );
        }

        Ok(points.into_iter().fold(0i64, i64::saturating_add))
    }

    /// The quiz's first result whose band contains `total`, or `None`.
    pub async fn resolve(&self, quiz_id: i64, total: i64) -> Result<Option<ResultBand>> {
        let results = self.repo.results(quiz_id).await?;
        Ok(pick_band(&results, total).cloned())
    }

    pub async fn score(&self, quiz_id: i64, selected: &SelectedChoices) -> Result<Outcome> {
        let total = self.aggregate(selected).await?;
        let result = self.resolve(quiz_id, total).await?;

        match &result {
            Some(band) => tracing::info!(
                "quiz {quiz_id}: total {total} resolved to result {}",
                band.id
            ),
            None => tracing::warn!("quiz {quiz_id}: total {total} matched no result band"),
        }

        Ok(Outcome { total, result })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
