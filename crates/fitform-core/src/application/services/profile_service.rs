//! Profile Service - read and edit the signed-in user.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::context::NotificationLevel;
use crate::application::dto::UserProfile;
use crate::application::ports::FitnessApi;
use crate::application::{AppContext, ApplicationResult};
use crate::domain::localization::client;
use crate::domain::{ObjectiveForm, ProfileForm};

pub struct ProfileService {
    api: Arc<dyn FitnessApi>,
    ctx: Arc<AppContext>,
}

impl ProfileService {
    pub fn new(api: Arc<dyn FitnessApi>, ctx: Arc<AppContext>) -> Self {
        Self { api, ctx }
    }

    #[instrument(skip_all)]
    pub async fn current(&self) -> ApplicationResult<UserProfile> {
        let result = self.try_current().await;
        self.ctx.reported(result)
    }

    /// Send only the fields the user filled in.
    #[instrument(skip_all)]
    pub async fn update_biometrics(&self, form: &mut ProfileForm) -> ApplicationResult<UserProfile> {
        let result = self.try_update_biometrics(form).await;
        self.ctx.reported(result)
    }

    #[instrument(skip_all)]
    pub async fn update_objective(
        &self,
        form: &mut ObjectiveForm,
    ) -> ApplicationResult<UserProfile> {
        let result = self.try_update_objective(form).await;
        self.ctx.reported(result)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    async fn try_current(&self) -> ApplicationResult<UserProfile> {
        let token = self.ctx.token()?;
        Ok(self.api.current_user(&token).await?)
    }

    async fn try_update_biometrics(&self, form: &mut ProfileForm) -> ApplicationResult<UserProfile> {
        let update = form.submit()?;
        let token = self.ctx.token()?;
        let _ticket = self.ctx.try_begin_submit()?;

        let user = self.api.update_biometrics(&token, &update).await?;
        info!(user_id = user.id, bmr = ?user.bmr, "Biometrics updated");
        self.ctx.notify(NotificationLevel::Success, client::PROFILE_SAVED);
        Ok(user)
    }

    async fn try_update_objective(&self, form: &mut ObjectiveForm) -> ApplicationResult<UserProfile> {
        let update = form.submit()?;
        let token = self.ctx.token()?;
        let _ticket = self.ctx.try_begin_submit()?;

        let user = self.api.update_objective(&token, &update).await?;
        info!(
            user_id = user.id,
            objective = %update.objective,
            target_calories = ?user.target_calories,
            "Objective updated"
        );
        self.ctx.notify(NotificationLevel::Success, client::PROFILE_SAVED);
        Ok(user)
    }
}
