//! fitform Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the fitform
//! fitness client, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           fitform-cli (CLI)             │
//! │      (forms in, reports out)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Auth, Profile, Skinfold, Meal, ...)   │
//! │   AppContext: session, toasts, guard    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (FitnessApi, SessionStore)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     fitform-adapters (Infrastructure)   │
//! │  (HttpApi, InMemoryApi, session files)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Constraints, validators, forms,       │
//! │   skinfold math, localization)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitform_core::prelude::*;
//!
//! # async fn run(api: Arc<dyn FitnessApi>, store: Arc<dyn SessionStore>) {
//! let ctx = Arc::new(AppContext::start(store));
//! let auth = AuthService::new(api, ctx.clone());
//!
//! let mut form = LoginForm::filled("ana@example.com", "supersecret");
//! if let Err(e) = auth.login(&mut form).await {
//!     // `report` already produced the localized line
//!     eprintln!("{}", ctx.localizer().message_or_generic(e.user_message().as_deref()));
//! }
//! # }
//! ```

// Domain layer (pure, synchronous)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AppContext, ApplicationError, ApplicationResult, AuthService, MealService,
        Notification, NotificationLevel, ProfileService, ProgressService, SkinfoldService,
        dto::*,
        ports::{ApiError, ApiResult, FitnessApi, Session, SessionStore},
    };
    pub use crate::domain::{
        ActivityLevel, AggressivenessLevel, BiometricsUpdate, Constraints, FitnessObjective,
        Form, FormErrors, Gender, Localizer, Locale, LoginForm, LoginPayload, ObjectiveForm,
        ObjectiveUpdate, ProfileForm, ProgressPeriod, RegistrationForm, RegistrationPayload,
        SkinfoldForm, SkinfoldRequest, SkinfoldSite, SkinfoldValues, ValidationResult,
    };
    pub use crate::error::{ErrorCategory, FitformError, FitformResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
