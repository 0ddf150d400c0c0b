//! Auth Service - sign up, sign in, sign out.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::context::NotificationLevel;
use crate::application::dto::UserProfile;
use crate::application::ports::{FitnessApi, Session};
use crate::application::{AppContext, ApplicationResult};
use crate::domain::localization::client;
use crate::domain::{LoginForm, RegistrationForm};

pub struct AuthService {
    api: Arc<dyn FitnessApi>,
    ctx: Arc<AppContext>,
}

impl AuthService {
    pub fn new(api: Arc<dyn FitnessApi>, ctx: Arc<AppContext>) -> Self {
        Self { api, ctx }
    }

    /// Validate the form, exchange credentials for a token and persist the
    /// session. The password is sent truncated to the hashing limit.
    #[instrument(skip_all)]
    pub async fn login(&self, form: &mut LoginForm) -> ApplicationResult<Session> {
        let result = self.try_login(form).await;
        self.ctx.reported(result)
    }

    #[instrument(skip_all)]
    pub async fn register(&self, form: &mut RegistrationForm) -> ApplicationResult<UserProfile> {
        let result = self.try_register(form).await;
        self.ctx.reported(result)
    }

    pub fn logout(&self) -> ApplicationResult<()> {
        let result = self.ctx.logout();
        self.ctx.reported(result)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    async fn try_login(&self, form: &mut LoginForm) -> ApplicationResult<Session> {
        let payload = form.submit()?;
        let _ticket = self.ctx.try_begin_submit()?;

        let token = self.api.login(&payload).await?;
        let session = Session::new(token.access_token, payload.email);
        self.ctx.sign_in(session.clone())?;
        self.ctx.notify(NotificationLevel::Success, client::SIGNED_IN);
        Ok(session)
    }

    async fn try_register(&self, form: &mut RegistrationForm) -> ApplicationResult<UserProfile> {
        let payload = form.submit()?;
        let _ticket = self.ctx.try_begin_submit()?;

        let user = self.api.register(&payload).await?;
        info!(user_id = user.id, "Account created");
        self.ctx.notify(NotificationLevel::Success, client::SIGNED_UP);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::dto::AuthToken;
    use crate::application::ports::{ApiError, MockFitnessApi, MockSessionStore};
    use crate::domain::{Form, RegistrationField};

    fn context(store: MockSessionStore) -> Arc<AppContext> {
        Arc::new(AppContext::start(Arc::new(store)))
    }

    fn signed_out_store() -> MockSessionStore {
        let mut store = MockSessionStore::new();
        store.expect_load().returning(|| Ok(None));
        store
    }

    fn profile(email: &str) -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "email": email,
            "first_name": "Ana",
            "last_name": "Ruiz"
        }))
        .unwrap()
    }

    fn filled_registration(password: &str) -> RegistrationForm {
        let mut form = RegistrationForm::new();
        for (field, value) in [
            (RegistrationField::Email, "ana@example.com"),
            (RegistrationField::Password, password),
            (RegistrationField::FirstName, "Ana"),
            (RegistrationField::LastName, "Ruiz"),
            (RegistrationField::Age, "30"),
            (RegistrationField::Gender, "female"),
            (RegistrationField::Weight, "60"),
            (RegistrationField::Height, "165"),
            (RegistrationField::ActivityLevel, "1.50"),
            (RegistrationField::Objective, "maintenance"),
            (RegistrationField::AggressivenessLevel, "2"),
        ] {
            form.set(field, value);
        }
        form
    }

    #[tokio::test]
    async fn login_persists_session_with_truncated_password() {
        let mut api = MockFitnessApi::new();
        api.expect_login()
            .withf(|p| p.email == "ana@example.com" && p.password.len() == 72)
            .times(1)
            .returning(|_| Ok(AuthToken::bearer("tok-1")));

        let mut store = signed_out_store();
        store
            .expect_save()
            .withf(|s| s.token == "tok-1")
            .times(1)
            .returning(|_| Ok(()));
        let ctx = context(store);
        let service = AuthService::new(Arc::new(api), ctx.clone());

        let mut form = LoginForm::filled(" ana@example.com ", "p".repeat(90));
        let session = service.login(&mut form).await.unwrap();

        assert_eq!(session.email, "ana@example.com");
        assert_eq!(ctx.token().unwrap(), "tok-1");
        assert!(!ctx.is_submitting());
        assert_eq!(ctx.drain_notifications()[0].message, "Sesión iniciada");
    }

    #[tokio::test]
    async fn invalid_login_never_reaches_backend() {
        let mut api = MockFitnessApi::new();
        api.expect_login().never();
        let ctx = context(signed_out_store());
        let service = AuthService::new(Arc::new(api), ctx.clone());

        let mut form = LoginForm::filled("not-an-email", "");
        let err = service.login(&mut form).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Validation(_)));
        assert_eq!(ctx.drain_notifications()[0].message, "Formato de email inválido");
    }

    #[tokio::test]
    async fn bad_credentials_are_localized() {
        let mut api = MockFitnessApi::new();
        api.expect_login().returning(|_| {
            Err(ApiError::from_response(
                401,
                r#"{"detail":"Incorrect email or password"}"#,
            ))
        });
        let mut store = signed_out_store();
        store.expect_clear().returning(|| Ok(()));
        let ctx = context(store);
        let service = AuthService::new(Arc::new(api), ctx.clone());

        let mut form = LoginForm::filled("ana@example.com", "wrongpass");
        assert!(service.login(&mut form).await.is_err());
        assert!(!ctx.is_signed_in());
        assert_eq!(
            ctx.drain_notifications()[0].message,
            "Email o contraseña incorrectos"
        );
    }

    #[tokio::test]
    async fn short_password_blocks_registration() {
        let mut api = MockFitnessApi::new();
        api.expect_register().never();
        let ctx = context(signed_out_store());
        let service = AuthService::new(Arc::new(api), ctx.clone());

        let mut form = filled_registration("short");
        let err = service.register(&mut form).await.unwrap_err();

        let ApplicationError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert!(
            ctx.drain_notifications()[0]
                .message
                .contains("al menos 8 caracteres")
        );
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_server_detail() {
        let mut api = MockFitnessApi::new();
        api.expect_register().returning(|_| {
            Err(ApiError::from_response(
                409,
                r#"{"detail":"Email already registered"}"#,
            ))
        });
        let ctx = context(signed_out_store());
        let service = AuthService::new(Arc::new(api), ctx.clone());

        let mut form = filled_registration("longenough");
        assert!(service.register(&mut form).await.is_err());
        assert_eq!(
            ctx.drain_notifications()[0].message,
            "Este email ya está registrado"
        );
    }

    #[tokio::test]
    async fn registration_returns_created_user() {
        let mut api = MockFitnessApi::new();
        api.expect_register()
            .withf(|p| p.age == 30 && p.first_name == "Ana")
            .returning(|p| Ok(profile(&p.email)));
        let ctx = context(signed_out_store());
        let service = AuthService::new(Arc::new(api), ctx);

        let mut form = filled_registration("longenough");
        let user = service.register(&mut form).await.unwrap();
        assert_eq!(user.email, "ana@example.com");
    }
}
