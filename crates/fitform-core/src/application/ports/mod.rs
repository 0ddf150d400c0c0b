//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `fitform-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FitnessApi`: the fitness backend
//!   - `SessionStore`: session persistence between runs
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

#[cfg(test)]
pub use output::{MockFitnessApi, MockSessionStore};
pub use output::{ApiError, ApiResult, FitnessApi, Session, SessionStore};
