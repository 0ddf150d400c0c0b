//! Application services - orchestrate use cases.
//!
//! Each service validates its form first, then checks the session, holds the
//! submit guard for the duration of the backend call, and reports failures
//! through [`AppContext::report`](crate::application::AppContext::report).

pub mod auth_service;
pub mod meal_service;
pub mod profile_service;
pub mod progress_service;
pub mod skinfold_service;

pub use auth_service::AuthService;
pub use meal_service::MealService;
pub use profile_service::ProfileService;
pub use progress_service::ProgressService;
pub use skinfold_service::SkinfoldService;
