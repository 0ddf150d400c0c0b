//! Infrastructure adapters for fitform.
//!
//! This crate implements the ports defined in `fitform-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod http;
pub mod memory;
pub mod session;

// Re-export commonly used adapters
pub use http::{HttpApi, HttpApiConfig};
pub use memory::InMemoryApi;
pub use session::{FileSessionStore, MemorySessionStore};
