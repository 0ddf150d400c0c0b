//! Skinfold Service - body-fat calculation, free-text parsing, history.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::context::NotificationLevel;
use crate::application::dto::{SkinfoldParse, SkinfoldResult};
use crate::application::ports::FitnessApi;
use crate::application::{AppContext, ApplicationResult};
use crate::domain::localization::client;
use crate::domain::{FormErrors, SkinfoldForm};

pub struct SkinfoldService {
    api: Arc<dyn FitnessApi>,
    ctx: Arc<AppContext>,
}

impl SkinfoldService {
    pub fn new(api: Arc<dyn FitnessApi>, ctx: Arc<AppContext>) -> Self {
        Self { api, ctx }
    }

    /// Submit the sheet for a Jackson-Pollock estimate.
    ///
    /// Client advisories are merged into the returned warnings.
    #[instrument(skip_all)]
    pub async fn calculate(&self, form: &mut SkinfoldForm) -> ApplicationResult<SkinfoldResult> {
        let result = self.try_calculate(form).await;
        self.ctx.reported(result)
    }

    /// Ask the backend to read caliper values out of free text and copy them
    /// into the sheet.
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub async fn parse_text(
        &self,
        text: &str,
        form: &mut SkinfoldForm,
    ) -> ApplicationResult<SkinfoldParse> {
        let result = self.try_parse_text(text, form).await;
        self.ctx.reported(result)
    }

    /// Past measurements, newest first. A failed refresh yields an empty list.
    #[instrument(skip_all)]
    pub async fn history(&self) -> Vec<SkinfoldResult> {
        match self.try_history().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Skinfold history unavailable");
                Vec::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    async fn try_calculate(&self, form: &mut SkinfoldForm) -> ApplicationResult<SkinfoldResult> {
        let submission = form.submit()?;
        let token = self.ctx.token()?;
        let _ticket = self.ctx.try_begin_submit()?;

        let mut result = self
            .api
            .calculate_skinfolds(&token, &submission.request)
            .await?;
        for advisory in submission.warnings {
            if !result.estimate.warnings.contains(&advisory) {
                result.estimate.warnings.push(advisory);
            }
        }
        info!(
            method = %result.estimate.method,
            body_fat = result.estimate.body_fat_percent,
            "Skinfolds calculated"
        );
        self.ctx
            .notify(NotificationLevel::Success, client::SKINFOLDS_SAVED);
        Ok(result)
    }

    async fn try_parse_text(
        &self,
        text: &str,
        form: &mut SkinfoldForm,
    ) -> ApplicationResult<SkinfoldParse> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FormErrors::single("text", client::SKINFOLD_TEXT_EMPTY).into());
        }
        let token = self.ctx.token()?;
        let _ticket = self.ctx.try_begin_submit()?;

        let parse = self.api.parse_skinfold_text(&token, text).await?;
        form.fill_sites(&parse.parsed);
        debug!(sites = parse.parsed.measured().count(), "Skinfold text parsed");
        for warning in &parse.warnings {
            self.ctx.notify(NotificationLevel::Info, warning);
        }
        Ok(parse)
    }

    async fn try_history(&self) -> ApplicationResult<Vec<SkinfoldResult>> {
        let token = self.ctx.token()?;
        let mut items = self.api.skinfold_history(&token).await?;
        items.sort_by(|a, b| b.measured_at.cmp(&a.measured_at));
        Ok(items)
    }
}
