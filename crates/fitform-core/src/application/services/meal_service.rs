//! Meal Service - natural-language meal parsing and logging.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::context::NotificationLevel;
use crate::application::dto::{LoggedMeal, MealEntry, MealEstimate};
use crate::application::ports::FitnessApi;
use crate::application::{AppContext, ApplicationResult};
use crate::domain::Constraints;
use crate::domain::localization::client;
use crate::domain::FormErrors;

/// Key for errors on the meal description.
pub const TEXT_KEY: &str = "text";

pub struct MealService {
    api: Arc<dyn FitnessApi>,
    ctx: Arc<AppContext>,
    constraints: Constraints,
}

impl MealService {
    pub fn new(api: Arc<dyn FitnessApi>, ctx: Arc<AppContext>) -> Self {
        Self {
            api,
            ctx,
            constraints: Constraints::STANDARD,
        }
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Check a meal description against the length bounds.
    pub fn check_text(&self, text: &str) -> Result<(), FormErrors> {
        let chars = text.trim().chars().count();
        if chars < self.constraints.min_meal_text {
            return Err(FormErrors::single(TEXT_KEY, client::MEAL_TEXT_TOO_SHORT));
        }
        if chars > self.constraints.max_meal_text {
            return Err(FormErrors::single(TEXT_KEY, client::MEAL_TEXT_TOO_LONG));
        }
        Ok(())
    }

    /// Estimate food, quantity and macros from a description. Nothing is
    /// stored.
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub async fn parse(&self, text: &str) -> ApplicationResult<MealEstimate> {
        let result = self.try_parse(text).await;
        self.ctx.reported(result)
    }

    #[instrument(skip_all, fields(food = %entry.food_name))]
    pub async fn log(&self, entry: &MealEntry) -> ApplicationResult<LoggedMeal> {
        let result = self.try_log(entry).await;
        self.ctx.reported(result)
    }

    /// Parse then log under a single submit.
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub async fn parse_and_log(&self, text: &str) -> ApplicationResult<(MealEstimate, LoggedMeal)> {
        let result = self.try_parse_and_log(text).await;
        self.ctx.reported(result)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    async fn try_parse(&self, text: &str) -> ApplicationResult<MealEstimate> {
        self.check_text(text)?;
        let _ticket = self.ctx.try_begin_submit()?;
        self.request_estimate(text).await
    }

    async fn try_log(&self, entry: &MealEntry) -> ApplicationResult<LoggedMeal> {
        let token = self.ctx.token()?;
        let _ticket = self.ctx.try_begin_submit()?;
        self.store_entry(&token, entry).await
    }

    async fn try_parse_and_log(&self, text: &str) -> ApplicationResult<(MealEstimate, LoggedMeal)> {
        self.check_text(text)?;
        let token = self.ctx.token()?;
        let _ticket = self.ctx.try_begin_submit()?;

        let estimate = self.request_estimate(text).await?;
        let logged = self.store_entry(&token, &MealEntry::from(&estimate)).await?;
        Ok((estimate, logged))
    }

    async fn request_estimate(&self, text: &str) -> ApplicationResult<MealEstimate> {
        let estimate = self.api.parse_meal(text.trim()).await?;
        info!(
            food = %estimate.food,
            grams = estimate.quantity_grams,
            kcal = estimate.total_calories,
            "Meal parsed"
        );
        Ok(estimate)
    }

    async fn store_entry(&self, token: &str, entry: &MealEntry) -> ApplicationResult<LoggedMeal> {
        let logged = self.api.log_meal(token, entry).await?;
        info!(meal_id = logged.id, kcal = logged.total_calories, "Meal logged");
        self.ctx.notify(NotificationLevel::Success, client::MEAL_SAVED);
        Ok(logged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::application::ApplicationError;
    use crate::application::ports::{ApiError, MockFitnessApi, MockSessionStore, Session};

    fn context(signed_in: bool) -> Arc<AppContext> {
        let mut store = MockSessionStore::new();
        store.expect_load().returning(move || {
            Ok(signed_in.then(|| Session::new("tok", "ana@example.com")))
        });
        Arc::new(AppContext::start(Arc::new(store)))
    }

    fn rice() -> MealEstimate {
        MealEstimate {
            food: "arroz".into(),
            quantity_grams: 200.0,
            calories_per_100g: 130.0,
            carbs_per_100g: 28.0,
            protein_per_100g: 2.7,
            fat_per_100g: 0.3,
            total_calories: 260.0,
            total_carbs: 56.0,
            total_protein: 5.4,
            total_fat: 0.6,
        }
    }

    fn logged(entry: &MealEntry) -> LoggedMeal {
        let factor = entry.quantity_grams / 100.0;
        LoggedMeal {
            id: 1,
            entry: entry.clone(),
            total_calories: entry.calories_per_100g * factor,
            total_carbs: entry.carbs_per_100g * factor,
            total_protein: entry.protein_per_100g * factor,
            total_fat: entry.fat_per_100g * factor,
            event_timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn short_text_never_reaches_backend() {
        let mut api = MockFitnessApi::new();
        api.expect_parse_meal().never();
        let ctx = context(true);
        let service = MealService::new(Arc::new(api), ctx.clone());

        let err = service.parse(" ab ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
        assert_eq!(
            ctx.drain_notifications()[0].message,
            "Describe la comida con al menos 3 caracteres"
        );
    }

    #[tokio::test]
    async fn long_text_is_rejected() {
        let service = MealService::new(Arc::new(MockFitnessApi::new()), context(true));
        let text = "a".repeat(3001);
        assert!(service.check_text(&text).is_err());
        assert!(service.check_text(&"a".repeat(3000)).is_ok());
    }

    #[tokio::test]
    async fn parse_works_signed_out() {
        let mut api = MockFitnessApi::new();
        api.expect_parse_meal()
            .withf(|text| text == "200 g de arroz")
            .returning(|_| Ok(rice()));
        let service = MealService::new(Arc::new(api), context(false));
        let estimate = service.parse(" 200 g de arroz ").await.unwrap();
        assert_eq!(estimate.total_calories, 260.0);
    }

    #[tokio::test]
    async fn parse_and_log_chains_both_calls() {
        let mut api = MockFitnessApi::new();
        api.expect_parse_meal().times(1).returning(|_| Ok(rice()));
        api.expect_log_meal()
            .withf(|token, entry| token == "tok" && entry.food_name == "arroz")
            .times(1)
            .returning(|_, entry| Ok(logged(entry)));
        let ctx = context(true);
        let service = MealService::new(Arc::new(api), ctx.clone());

        let (estimate, meal) = service.parse_and_log("200 g de arroz").await.unwrap();
        assert_eq!(estimate.food, meal.entry.food_name);
        assert_eq!(meal.total_calories, 260.0);
        assert!(!ctx.is_submitting());
    }

    #[tokio::test]
    async fn log_requires_session() {
        let mut api = MockFitnessApi::new();
        api.expect_log_meal().never();
        let service = MealService::new(Arc::new(api), context(false));
        let err = service.log(&MealEntry::from(&rice())).await.unwrap_err();
        assert_eq!(err, ApplicationError::NotAuthenticated);
    }

    #[tokio::test]
    async fn server_error_code_is_localized() {
        let mut api = MockFitnessApi::new();
        api.expect_parse_meal().returning(|_| {
            Err(ApiError::from_response(422, r#"{"error":"insufficient_data"}"#))
        });
        let ctx = context(false);
        let service = MealService::new(Arc::new(api), ctx.clone());
        assert!(service.parse("algo rico").await.is_err());
        assert_eq!(
            ctx.drain_notifications()[0].message,
            "Faltan datos: indica el alimento y la cantidad"
        );
    }
}
