//! HTTP adapter for the fitness backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use fitform_core::application::dto::{
    AuthToken, LoggedMeal, MealEntry, MealEstimate, ProgressEvaluation, ProgressRequest,
    ProgressTimeline, SkinfoldParse, SkinfoldResult, TextRequest, UserProfile,
};
use fitform_core::application::ports::{ApiError, ApiResult, FitnessApi};
use fitform_core::domain::{
    BiometricsUpdate, LoginPayload, ObjectiveUpdate, ProgressPeriod, RegistrationPayload,
    SkinfoldRequest,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// JSON client for the backend REST API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &HttpApiConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Unreachable("base url must be non-empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Unreachable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Backend responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn post<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path, token).json(body))
            .await
    }

    async fn put<B, T>(&self, path: &str, token: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path, Some(token)).json(body))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path, Some(token)))
            .await
    }
}

#[async_trait]
impl FitnessApi for HttpApi {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &LoginPayload) -> ApiResult<AuthToken> {
        self.post("/auth/login", None, credentials).await
    }

    #[instrument(skip_all, fields(email = %payload.email))]
    async fn register(&self, payload: &RegistrationPayload) -> ApiResult<UserProfile> {
        self.post("/auth/register", None, payload).await
    }

    async fn current_user(&self, token: &str) -> ApiResult<UserProfile> {
        self.get("/users/me", token).await
    }

    /// Name changes go through the general profile endpoint; pure biometric
    /// changes use the dedicated one.
    async fn update_biometrics(
        &self,
        token: &str,
        update: &BiometricsUpdate,
    ) -> ApiResult<UserProfile> {
        let path = if update.changes_names() {
            "/users/me"
        } else {
            "/users/me/biometrics"
        };
        self.put(path, token, update).await
    }

    async fn update_objective(
        &self,
        token: &str,
        update: &ObjectiveUpdate,
    ) -> ApiResult<UserProfile> {
        self.put("/users/me", token, update).await
    }

    async fn calculate_skinfolds(
        &self,
        token: &str,
        request: &SkinfoldRequest,
    ) -> ApiResult<SkinfoldResult> {
        self.post("/users/me/skinfolds", Some(token), request).await
    }

    async fn parse_skinfold_text(&self, token: &str, text: &str) -> ApiResult<SkinfoldParse> {
        let body = TextRequest { text: text.into() };
        self.post("/users/me/skinfolds/ai-parse", Some(token), &body)
            .await
    }

    async fn skinfold_history(&self, token: &str) -> ApiResult<Vec<SkinfoldResult>> {
        self.get("/users/me/skinfolds", token).await
    }

    async fn parse_meal(&self, text: &str) -> ApiResult<MealEstimate> {
        let body = TextRequest { text: text.into() };
        self.post("/food/parse-and-calculate", None, &body).await
    }

    async fn log_meal(&self, token: &str, entry: &MealEntry) -> ApiResult<LoggedMeal> {
        self.post("/nutrition/meals", Some(token), entry).await
    }

    async fn evaluate_progress(
        &self,
        token: &str,
        period: ProgressPeriod,
    ) -> ApiResult<ProgressEvaluation> {
        let body = ProgressRequest { periodo: period };
        self.post("/users/me/progress/evaluate", Some(token), &body)
            .await
    }

    async fn progress_timeline(
        &self,
        token: &str,
        period: ProgressPeriod,
    ) -> ApiResult<ProgressTimeline> {
        let request = self
            .request(Method::GET, "/users/me/progress/timeline", Some(token))
            .query(&[("periodo", period.as_str())]);
        self.send(request).await
    }
}
