//! Profilegen Core - Shared data structures, configuration and infrastructure
//!
//! Defines the types that flow through the fetch → aggregate → render pipeline,
//! together with the error, logging and configuration layers used by every crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
