//! Application layer for fitform.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (auth, profile, skinfolds, meals, progress)
//! - **Ports**: Interface definitions (traits) for the backend and session storage
//! - **Context**: Session, notifications and submit guard shared by services
//! - **DTOs**: Backend request/response bodies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All field rules live in `crate::domain`.

pub mod context;
pub mod dto;
pub mod error;
pub mod ports;
pub mod services;

pub use context::{AppContext, Notification, NotificationLevel, SubmitTicket};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{ApiError, FitnessApi, Session, SessionStore};
pub use services::{AuthService, MealService, ProfileService, ProgressService, SkinfoldService};
