//! Wiring: backend, session store and the shared application context.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use fitform_adapters::{FileSessionStore, HttpApi, HttpApiConfig, InMemoryApi};
use fitform_core::prelude::*;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Everything a backend command needs.
pub struct App {
    api: Arc<dyn FitnessApi>,
    ctx: Arc<AppContext>,
}

impl App {
    /// Pick the backend, restore the saved session and start the context.
    pub fn build(global: &GlobalArgs, config: &AppConfig) -> CliResult<Self> {
        let localizer = Localizer::new(config.locale);
        let offline = global.offline || config.api.offline;

        let api: Arc<dyn FitnessApi> = if offline {
            info!("Using the offline backend");
            Arc::new(InMemoryApi::with_demo_account())
        } else {
            let http = HttpApi::new(&HttpApiConfig {
                base_url: config.api.base_url.clone(),
                timeout: Duration::from_secs(config.api.timeout_secs),
            })
            .map_err(|e| CliError::core(e, &localizer))?;
            debug!(base_url = %http.base_url(), "Using the HTTP backend");
            Arc::new(http)
        };

        let session_path = config.session_path(offline);
        debug!(path = %session_path.display(), "Session store");
        let store = Arc::new(FileSessionStore::new(session_path));
        let ctx = Arc::new(AppContext::start(store).with_localizer(localizer));

        Ok(Self { api, ctx })
    }

    pub fn ctx(&self) -> &AppContext {
        &self.ctx
    }

    pub fn localizer(&self) -> Localizer {
        self.ctx.localizer()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone(), self.ctx.clone())
    }

    pub fn profile(&self) -> ProfileService {
        ProfileService::new(self.api.clone(), self.ctx.clone())
    }

    pub fn skinfolds(&self) -> SkinfoldService {
        SkinfoldService::new(self.api.clone(), self.ctx.clone())
    }

    pub fn meals(&self) -> MealService {
        MealService::new(self.api.clone(), self.ctx.clone())
    }

    pub fn progress(&self) -> ProgressService {
        ProgressService::new(self.api.clone(), self.ctx.clone())
    }

    /// Localized CLI error for a failed service call. The queued error toast
    /// is dropped since the error renderer prints the same line.
    pub fn fail(&self, err: ApplicationError) -> CliError {
        self.ctx.drain_notifications();
        CliError::core(err, &self.localizer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::cli::global::OutputFormat;

    fn offline_args() -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
            offline: true,
        }
    }

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.session.path = Some(dir.path().join("session.json"));
        config
    }

    #[tokio::test]
    async fn offline_demo_login_persists_session() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let app = App::build(&offline_args(), &config).unwrap();
        let mut form = LoginForm::filled("demo@fitform.app", "demo12345");
        app.auth().login(&mut form).await.unwrap();
        assert!(dir.path().join("session.json").exists());

        // A second process restores it.
        let again = App::build(&offline_args(), &config).unwrap();
        assert!(again.ctx().is_signed_in());
        assert!(again.profile().current().await.is_ok());
    }

    #[tokio::test]
    async fn fail_clears_the_error_toast() {
        let dir = TempDir::new().unwrap();
        let app = App::build(&offline_args(), &config_in(&dir)).unwrap();

        let err = app.profile().current().await.unwrap_err();
        let cli = app.fail(err);
        assert_eq!(cli.to_string(), "Debes iniciar sesión");
        assert!(app.ctx().drain_notifications().is_empty());
    }
}
