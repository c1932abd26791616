//! Profilegen Repository - Fetching and analyzing a user's repositories
//!
//! Talks to the hosting platform API, picks between live and sample data,
//! and aggregates repository records into profile statistics.

pub mod analyzer;
pub mod api;
pub mod filter;
pub mod keywords;
pub mod sample;
pub mod source;

pub use analyzer::*;
pub use api::{ApiClientConfig, GitHubApiClient, RepositoryApiClient, RepositorySummary};
pub use filter::*;
pub use sample::*;
pub use source::*;
