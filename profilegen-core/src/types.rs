//! Core data type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository as seen by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub fork: bool,
    pub stars: u64,
    pub forks: u64,
    pub topics: Vec<String>,
    pub description: Option<String>,
    /// README text; `None` when it could not be fetched
    pub readme: Option<String>,
    /// Language name to byte count, in the order the platform reported them
    pub languages: Vec<(String, u64)>,
}

/// Repository totals across all analyzed repositories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTotals {
    pub total_repos: u64,
    pub total_stars: u64,
    pub total_forks: u64,
}

/// Computed summary of all analyzed repositories for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Languages ranked by byte count, descending
    pub languages: Vec<(String, u64)>,
    /// Detected tools, alphabetical
    pub tools: Vec<String>,
    /// Detected frameworks and databases, alphabetical
    pub frameworks: Vec<String>,
    /// Top project categories with the number of repositories in each
    pub project_categories: Vec<(String, u64)>,
    /// Most common topics
    pub topics: Vec<String>,
    pub stats: RepoTotals,
}

impl Aggregate {
    /// Category with the most repositories, if any
    pub fn top_category(&self) -> Option<&str> {
        self.project_categories
            .first()
            .map(|(category, _)| category.as_str())
    }
}

/// Profile-level statistics for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub created_at: Option<DateTime<Utc>>,
}
