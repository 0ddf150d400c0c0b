//! Offline backend: the full API served from process memory.
//!
//! `InMemoryApi` applies the same server rules as the real backend
//! (registration checks, duplicate emails, energy targets, Jackson-Pollock
//! estimates, food lookup, progress scoring) so the CLI works without a
//! server and the application layer can be exercised end to end.
//!
//! ## Tokens
//!
//! Access tokens have the form `offline.<user id>`. Anything else, or an
//! id with no account, is rejected with 401 like an expired JWT.

mod energy;
mod food;
mod progress;
mod skinfold_text;

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument};

use fitform_core::application::dto::{
    AuthToken, LoggedMeal, MealEntry, MealEstimate, ProgressEvaluation, ProgressTimeline,
    SkinfoldParse, SkinfoldResult, UserProfile,
};
use fitform_core::application::ports::{ApiError, ApiResult, FitnessApi};
use fitform_core::domain::localization::server;
use fitform_core::domain::{
    ActivityLevel, AggressivenessLevel, BiometricsUpdate, Constraints, FitnessObjective, Gender,
    LoginPayload, ObjectiveUpdate, ProgressPeriod, RegistrationInput, RegistrationPayload,
    SkinfoldRequest, SkinfoldSite, SkinfoldValues, estimate_body_fat, validate_user_registration,
};

pub use energy::{Targets, bmr, objective_adjustment, targets, tdee};
pub use food::{FOODS, Food};
pub use progress::{HistoryRecord, Measurement, TimelineSource, WeightEntry, evaluate, timeline};

const TOKEN_PREFIX: &str = "offline.";

pub const DEMO_EMAIL: &str = "demo@fitform.app";
pub const DEMO_PASSWORD: &str = "demo12345";

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn status(code: u16, detail: impl Into<String>) -> ApiError {
    ApiError::Status {
        status: code,
        detail: Some(detail.into()),
    }
}

fn invalid_token() -> ApiError {
    status(401, server::INVALID_TOKEN)
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone)]
struct Account {
    profile: UserProfile,
    password: String,
    measurements: Vec<Measurement>,
    weights: Vec<WeightEntry>,
    meals: Vec<LoggedMeal>,
}

impl Account {
    /// Recomputes BMR, TDEE and targets from the current biometrics.
    fn refresh_energy(&mut self) {
        let p = &mut self.profile;
        let (Some(weight), Some(height), Some(age), Some(gender)) =
            (p.weight, p.height, p.age, p.gender)
        else {
            return;
        };
        let basal = bmr(weight, height, age, gender);
        p.bmr = Some(basal);

        let Some(activity) = p.activity_level else {
            return;
        };
        let expenditure = tdee(basal, activity);
        p.daily_caloric_expenditure = Some(expenditure);

        let objective = p.objective.unwrap_or(FitnessObjective::Maintenance);
        let level = p.aggressiveness_level.unwrap_or_default();
        let t = targets(expenditure, objective, level);
        p.target_calories = Some(t.calories);
        p.carbs_target_g = Some(t.carbs_g);
        p.protein_target_g = Some(t.protein_g);
        p.fat_target_g = Some(t.fat_g);
    }

    fn history(&self) -> Vec<HistoryRecord> {
        self.measurements.iter().map(HistoryRecord::from).collect()
    }
}

#[derive(Debug, Default)]
struct State {
    accounts: BTreeMap<i64, Account>,
    next_user_id: i64,
    next_measurement_id: i64,
    next_meal_id: i64,
}

impl State {
    fn id_for_email(&self, email: &str) -> Option<i64> {
        self.accounts
            .iter()
            .find(|(_, a)| a.profile.email.eq_ignore_ascii_case(email))
            .map(|(id, _)| *id)
    }

    fn account(&self, token: &str) -> ApiResult<&Account> {
        token
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
            .and_then(|id| self.accounts.get(&id))
            .ok_or_else(invalid_token)
    }

    fn account_mut(&mut self, token: &str) -> ApiResult<&mut Account> {
        token
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
            .and_then(|id| self.accounts.get_mut(&id))
            .ok_or_else(invalid_token)
    }

    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

// ============================================================================
// InMemoryApi
// ============================================================================

/// Backend implementation over in-process state.
#[derive(Debug, Default)]
pub struct InMemoryApi {
    state: RwLock<State>,
    constraints: Constraints,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// An API holding the demo account with two months of measurements
    /// and a few logged meals.
    pub fn with_demo_account() -> Self {
        let api = Self::new();
        api.seed_demo(Utc::now());
        api
    }

    pub fn token_for(user_id: i64) -> String {
        format!("{TOKEN_PREFIX}{user_id}")
    }

    fn seed_demo(&self, now: DateTime<Utc>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = State::next_id(&mut state.next_user_id);

        let mut account = Account {
            profile: UserProfile {
                id,
                email: DEMO_EMAIL.to_string(),
                first_name: "Demo".to_string(),
                last_name: "Fitform".to_string(),
                is_active: true,
                created_at: Some(now - Duration::days(90)),
                age: Some(34),
                gender: Some(Gender::Male),
                weight: Some(81.0),
                height: Some(178.0),
                activity_level: Some(ActivityLevel::ModeratelyActive),
                bmr: None,
                daily_caloric_expenditure: None,
                objective: Some(FitnessObjective::FatLoss),
                aggressiveness_level: Some(AggressivenessLevel::Moderate),
                target_calories: None,
                protein_target_g: None,
                fat_target_g: None,
                carbs_target_g: None,
            },
            password: DEMO_PASSWORD.to_string(),
            measurements: Vec::new(),
            weights: Vec::new(),
            meals: Vec::new(),
        };
        account.refresh_energy();

        // Weekly check-ins, leaning out slowly.
        for week in 0..9_i64 {
            let mut values = SkinfoldValues::default();
            for (i, &site) in SkinfoldSite::ALL.iter().enumerate() {
                values.set(site, Some(22.0 + i as f64 - 0.8 * week as f64));
            }
            let weight = 84.2 - 0.4 * week as f64;
            let request = SkinfoldRequest::new(Gender::Male, 34, values).with_weight(weight);
            if let Ok(estimate) = estimate_body_fat(&request, &self.constraints) {
                let measurement_id = State::next_id(&mut state.next_measurement_id);
                account.measurements.push(Measurement {
                    result: SkinfoldResult {
                        id: Some(measurement_id),
                        measured_at: now - Duration::days(7 * (8 - week)),
                        estimate,
                    },
                    weight_kg: Some(weight),
                });
            }
        }

        for (days_ago, text) in [
            (2, "80 g de avena"),
            (2, "200 g de pollo"),
            (1, "2 huevos"),
            (1, "150 g de arroz"),
            (0, "1 plátano"),
        ] {
            if let Ok(estimate) = food::parse(text) {
                let meal_id = State::next_id(&mut state.next_meal_id);
                account
                    .meals
                    .push(logged(meal_id, &MealEntry::from(&estimate), now - Duration::days(days_ago)));
            }
        }

        state.accounts.insert(id, account);
    }

    fn read<T>(&self, token: &str, f: impl FnOnce(&Account) -> T) -> ApiResult<T> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.account(token).map(f)
    }
}

fn logged(id: i64, entry: &MealEntry, at: DateTime<Utc>) -> LoggedMeal {
    let total = |per_100g: f64| round2(per_100g * entry.quantity_grams / 100.0);
    LoggedMeal {
        id,
        entry: entry.clone(),
        total_calories: total(entry.calories_per_100g),
        total_carbs: total(entry.carbs_per_100g),
        total_protein: total(entry.protein_per_100g),
        total_fat: total(entry.fat_per_100g),
        event_timestamp: at,
    }
}

fn registration_input(payload: &RegistrationPayload) -> RegistrationInput {
    RegistrationInput {
        email: payload.email.clone(),
        password: payload.password.clone(),
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        age: payload.age.to_string(),
        gender: payload.gender.to_string(),
        weight: payload.weight.to_string(),
        height: payload.height.to_string(),
        activity_level: payload.activity_level.to_string(),
        objective: payload.objective.to_string(),
        aggressiveness_level: payload.aggressiveness_level.to_string(),
    }
}

#[async_trait]
impl FitnessApi for InMemoryApi {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &LoginPayload) -> ApiResult<AuthToken> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let id = state
            .id_for_email(credentials.email.trim())
            .filter(|id| state.accounts[id].password == credentials.password)
            .ok_or_else(|| status(401, server::BAD_CREDENTIALS))?;
        debug!(user_id = id, "Offline login");
        Ok(AuthToken::bearer(Self::token_for(id)))
    }

    #[instrument(skip_all, fields(email = %payload.email))]
    async fn register(&self, payload: &RegistrationPayload) -> ApiResult<UserProfile> {
        let report = validate_user_registration(&registration_input(payload));
        if let Some(message) = report.errors.values().next() {
            return Err(status(422, message.clone()));
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.id_for_email(payload.email.trim()).is_some() {
            return Err(status(409, server::EMAIL_TAKEN));
        }

        let id = State::next_id(&mut state.next_user_id);
        let mut account = Account {
            profile: UserProfile {
                id,
                email: payload.email.trim().to_lowercase(),
                first_name: payload.first_name.trim().to_string(),
                last_name: payload.last_name.trim().to_string(),
                is_active: true,
                created_at: Some(Utc::now()),
                age: Some(payload.age),
                gender: Some(payload.gender),
                weight: Some(payload.weight),
                height: Some(payload.height),
                activity_level: Some(payload.activity_level),
                bmr: None,
                daily_caloric_expenditure: None,
                objective: Some(payload.objective),
                aggressiveness_level: Some(payload.aggressiveness_level),
                target_calories: None,
                protein_target_g: None,
                fat_target_g: None,
                carbs_target_g: None,
            },
            password: payload.password.clone(),
            measurements: Vec::new(),
            weights: Vec::new(),
            meals: Vec::new(),
        };
        account.refresh_energy();
        let profile = account.profile.clone();
        state.accounts.insert(id, account);

        info!(user_id = id, "Offline account created");
        Ok(profile)
    }

    async fn current_user(&self, token: &str) -> ApiResult<UserProfile> {
        self.read(token, |a| a.profile.clone())
    }

    async fn update_biometrics(
        &self,
        token: &str,
        update: &BiometricsUpdate,
    ) -> ApiResult<UserProfile> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let account = state.account_mut(token)?;
        let p = &mut account.profile;

        if let Some(first) = &update.first_name {
            p.first_name = first.trim().to_string();
        }
        if let Some(last) = &update.last_name {
            p.last_name = last.trim().to_string();
        }
        p.age = update.age.or(p.age);
        p.gender = update.gender.or(p.gender);
        p.height = update.height.or(p.height);
        p.activity_level = update.activity_level.or(p.activity_level);
        if let Some(weight) = update.weight {
            p.weight = Some(weight);
            account.weights.push(WeightEntry {
                at: Utc::now(),
                weight_kg: weight,
            });
        }

        account.refresh_energy();
        Ok(account.profile.clone())
    }

    async fn update_objective(
        &self,
        token: &str,
        update: &ObjectiveUpdate,
    ) -> ApiResult<UserProfile> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let account = state.account_mut(token)?;
        account.profile.objective = Some(update.objective);
        account.profile.aggressiveness_level = Some(update.aggressiveness_level);
        account.refresh_energy();
        Ok(account.profile.clone())
    }

    /// Falls back to the profile weight when the request has none.
    async fn calculate_skinfolds(
        &self,
        token: &str,
        request: &SkinfoldRequest,
    ) -> ApiResult<SkinfoldResult> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let State {
            accounts,
            next_measurement_id,
            ..
        } = &mut *state;
        let account = token
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
            .and_then(|id| accounts.get_mut(&id))
            .ok_or_else(invalid_token)?;

        let request = match (request.weight_kg, account.profile.weight) {
            (None, Some(weight)) => request.clone().with_weight(weight),
            _ => request.clone(),
        };
        let estimate = estimate_body_fat(&request, &self.constraints)
            .map_err(|e| status(400, e.to_string()))?;

        let result = SkinfoldResult {
            id: Some(State::next_id(next_measurement_id)),
            measured_at: Utc::now(),
            estimate,
        };
        account.measurements.push(Measurement {
            result: result.clone(),
            weight_kg: request.weight_kg,
        });
        debug!(method = %result.estimate.method, "Offline skinfold calculation");
        Ok(result)
    }

    async fn parse_skinfold_text(&self, token: &str, text: &str) -> ApiResult<SkinfoldParse> {
        self.read(token, |_| skinfold_text::parse(text))
    }

    async fn skinfold_history(&self, token: &str) -> ApiResult<Vec<SkinfoldResult>> {
        self.read(token, |a| {
            let mut results: Vec<SkinfoldResult> =
                a.measurements.iter().map(|m| m.result.clone()).collect();
            results.sort_by(|x, y| y.measured_at.cmp(&x.measured_at));
            results
        })
    }

    async fn parse_meal(&self, text: &str) -> ApiResult<MealEstimate> {
        food::parse(text)
    }

    async fn log_meal(&self, token: &str, entry: &MealEntry) -> ApiResult<LoggedMeal> {
        if entry.quantity_grams <= 0.0 || entry.food_name.trim().is_empty() {
            return Err(status(422, server::FOOD_INSUFFICIENT_DATA));
        }
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = State::next_id(&mut state.next_meal_id);
        let account = state.account_mut(token)?;
        let meal = logged(id, entry, Utc::now());
        account.meals.push(meal.clone());
        Ok(meal)
    }

    async fn evaluate_progress(
        &self,
        token: &str,
        period: ProgressPeriod,
    ) -> ApiResult<ProgressEvaluation> {
        self.read(token, |a| evaluate(a.profile.objective, period, &a.history()))
    }

    async fn progress_timeline(
        &self,
        token: &str,
        period: ProgressPeriod,
    ) -> ApiResult<ProgressTimeline> {
        self.read(token, |a| {
            let source = TimelineSource {
                profile: &a.profile,
                measurements: &a.measurements,
                weights: &a.weights,
                meals: &a.meals,
            };
            timeline(&source, period, Utc::now())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitform_core::domain::LoginForm;

    fn payload(email: &str) -> RegistrationPayload {
        RegistrationPayload {
            email: email.into(),
            password: "supersecret".into(),
            first_name: "Luis".into(),
            last_name: "Gómez".into(),
            age: 30,
            gender: Gender::Male,
            weight: 80.0,
            height: 180.0,
            activity_level: ActivityLevel::ModeratelyActive,
            objective: FitnessObjective::Maintenance,
            aggressiveness_level: AggressivenessLevel::Moderate,
        }
    }

    #[tokio::test]
    async fn register_computes_energy_targets() {
        let api = InMemoryApi::new();
        let profile = api.register(&payload("luis@example.com")).await.unwrap();
        assert_eq!(profile.bmr, Some(1780.0));
        assert_eq!(profile.daily_caloric_expenditure, Some(2670.0));
        assert_eq!(profile.target_calories, Some(2670.0));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let api = InMemoryApi::new();
        api.register(&payload("luis@example.com")).await.unwrap();
        let err = api.register(&payload("LUIS@example.com")).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.detail(), Some(server::EMAIL_TAKEN));
    }

    #[tokio::test]
    async fn registration_rules_apply_server_side() {
        let api = InMemoryApi::new();
        let mut bad = payload("luis@example.com");
        bad.age = 121;
        let err = api.register(&bad).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.detail(), Some("Age must be between 1 and 120"));

        bad.age = 0;
        let err = api.register(&bad).await.unwrap_err();
        assert_eq!(err.detail(), Some("Age must be between 1 and 120"));
    }

    #[tokio::test]
    async fn login_then_profile() {
        let api = InMemoryApi::new();
        api.register(&payload("luis@example.com")).await.unwrap();

        let credentials = LoginForm::filled("luis@example.com", "supersecret")
            .submit()
            .unwrap();
        let token = api.login(&credentials).await.unwrap();
        assert_eq!(token.token_type, "bearer");

        let me = api.current_user(&token.access_token).await.unwrap();
        assert_eq!(me.email, "luis@example.com");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let api = InMemoryApi::with_demo_account();
        let credentials = LoginPayload {
            email: DEMO_EMAIL.into(),
            password: "nope-nope".into(),
        };
        let err = api.login(&credentials).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.detail(), Some(server::BAD_CREDENTIALS));
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let api = InMemoryApi::with_demo_account();
        for token in ["garbage", "offline.999", "offline.x"] {
            let err = api.current_user(token).await.unwrap_err();
            assert_eq!(err.detail(), Some(server::INVALID_TOKEN), "{token}");
        }
    }

    #[tokio::test]
    async fn objective_change_recomputes_targets() {
        let api = InMemoryApi::new();
        let profile = api.register(&payload("luis@example.com")).await.unwrap();
        let token = InMemoryApi::token_for(profile.id);

        let updated = api
            .update_objective(
                &token,
                &ObjectiveUpdate {
                    objective: FitnessObjective::FatLoss,
                    aggressiveness_level: AggressivenessLevel::Moderate,
                },
            )
            .await
            .unwrap();
        let target = updated.target_calories.unwrap();
        assert!((target - 2269.5).abs() < 0.2, "{target}");
    }

    #[tokio::test]
    async fn demo_account_has_history_and_progress() {
        let api = InMemoryApi::with_demo_account();
        let token = InMemoryApi::token_for(1);

        let history = api.skinfold_history(&token).await.unwrap();
        assert_eq!(history.len(), 9);
        assert!(history[0].measured_at > history[1].measured_at);

        let eval = api.evaluate_progress(&token, ProgressPeriod::Month).await.unwrap();
        assert_eq!(eval.estado, progress::STATE_POSITIVE);
        assert!(eval.metricas.delta_fat.is_some_and(|d| d < 0.0));

        let tl = api.progress_timeline(&token, ProgressPeriod::Week).await.unwrap();
        assert!(!tl.series.calorias_diarias.is_empty());
    }

    #[tokio::test]
    async fn calculation_uses_profile_weight() {
        let api = InMemoryApi::new();
        let profile = api.register(&payload("luis@example.com")).await.unwrap();
        let token = InMemoryApi::token_for(profile.id);

        let mut values = SkinfoldValues::default();
        for &site in SkinfoldSite::ALL {
            values.set(site, Some(15.0));
        }
        let result = api
            .calculate_skinfolds(&token, &SkinfoldRequest::new(Gender::Male, 30, values))
            .await
            .unwrap();
        assert!(result.estimate.fat_mass_kg.is_some());
        assert_eq!(api.skinfold_history(&token).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn incomplete_sites_are_a_bad_request() {
        let api = InMemoryApi::with_demo_account();
        let token = InMemoryApi::token_for(1);
        let mut values = SkinfoldValues::default();
        values.set(SkinfoldSite::Chest, Some(10.0));
        let err = api
            .calculate_skinfolds(&token, &SkinfoldRequest::new(Gender::Male, 34, values))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn logged_meal_totals() {
        let api = InMemoryApi::with_demo_account();
        let token = InMemoryApi::token_for(1);
        let estimate = api.parse_meal("250 g de arroz").await.unwrap();
        let meal = api.log_meal(&token, &MealEntry::from(&estimate)).await.unwrap();
        assert_eq!(meal.total_calories, 325.0);
        assert_eq!(meal.entry.food_name, "arroz");
    }
}
