//! Progress Service - objective evaluation and body-composition timeline.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::dto::{ProgressEvaluation, ProgressTimeline};
use crate::application::ports::FitnessApi;
use crate::application::{AppContext, ApplicationResult};
use crate::domain::ProgressPeriod;

pub struct ProgressService {
    api: Arc<dyn FitnessApi>,
    ctx: Arc<AppContext>,
}

impl ProgressService {
    pub fn new(api: Arc<dyn FitnessApi>, ctx: Arc<AppContext>) -> Self {
        Self { api, ctx }
    }

    /// Score progress towards the user's objective over `period`.
    #[instrument(skip_all, fields(period = %period))]
    pub async fn evaluate(&self, period: ProgressPeriod) -> ApplicationResult<ProgressEvaluation> {
        let result = self.try_evaluate(period).await;
        self.ctx.reported(result)
    }

    /// Chart data for `period`. `None` when the refresh fails.
    #[instrument(skip_all, fields(period = %period))]
    pub async fn timeline(&self, period: ProgressPeriod) -> Option<ProgressTimeline> {
        match self.try_timeline(period).await {
            Ok(timeline) => Some(timeline),
            Err(e) => {
                warn!(error = %e, "Progress timeline unavailable");
                None
            }
        }
    }

    async fn try_evaluate(&self, period: ProgressPeriod) -> ApplicationResult<ProgressEvaluation> {
        let token = self.ctx.token()?;
        let _ticket = self.ctx.try_begin_submit()?;
        let evaluation = self.api.evaluate_progress(&token, period).await?;
        info!(score = evaluation.score, estado = %evaluation.estado, "Progress evaluated");
        Ok(evaluation)
    }

    async fn try_timeline(&self, period: ProgressPeriod) -> ApplicationResult<ProgressTimeline> {
        let token = self.ctx.token()?;
        Ok(self.api.progress_timeline(&token, period).await?)
    }
}
