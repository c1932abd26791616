//! Data source selection: live platform data or canned sample data
//!
//! Nothing here ever fails. Missing credentials, client construction errors
//! and upstream API errors all degrade to the sample data.

use profilegen_core::{Aggregate, ProfileConfig, ProfileResult, RepositoryRecord, UserStats};
use tracing::{debug, info, warn};

use crate::analyzer::RepositoryAnalyzer;
use crate::api::{ApiClientConfig, GitHubApiClient, RepositoryApiClient};
use crate::filter::should_include_repository;
use crate::sample::{sample_aggregate, sample_user_stats};

/// Where profile data comes from for this run
pub enum DataSource {
    /// Fixed sample data (no credential, or the client could not be built)
    Sample,
    /// Live data from the platform API
    Live(Box<dyn RepositoryApiClient>),
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Sample => f.write_str("DataSource::Sample"),
            DataSource::Live(_) => f.write_str("DataSource::Live"),
        }
    }
}

impl DataSource {
    /// Pick the data source for a run.
    ///
    /// Without an access token the run uses sample data; a client that cannot
    /// be constructed also forces sample mode.
    pub fn from_config(config: &ProfileConfig) -> Self {
        if !config.has_credential() {
            info!("No access token configured, running in sample mode");
            return DataSource::Sample;
        }

        match GitHubApiClient::new(ApiClientConfig::from_profile_config(config)) {
            Ok(client) => DataSource::Live(Box::new(client)),
            Err(e) => {
                warn!(error = %e, "Failed to initialize API client, running in sample mode");
                DataSource::Sample
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, DataSource::Live(_))
    }

    /// Aggregate the user's repositories, falling back to the sample aggregate
    pub async fn analyze_repositories(&self, config: &ProfileConfig) -> Aggregate {
        let client = match self {
            DataSource::Sample => {
                info!("Using sample repository data");
                return sample_aggregate();
            }
            DataSource::Live(client) => client.as_ref(),
        };

        match collect_live_aggregate(client, config).await {
            Ok(aggregate) => aggregate,
            Err(e) => {
                e.log();
                warn!("Falling back to sample repository data");
                sample_aggregate()
            }
        }
    }

    /// Fetch the user's profile statistics, falling back to sample stats
    pub async fn user_stats(&self, username: &str) -> UserStats {
        let client = match self {
            DataSource::Sample => {
                info!("Using sample user statistics");
                return sample_user_stats();
            }
            DataSource::Live(client) => client.as_ref(),
        };

        match client.get_user(username).await {
            Ok(stats) => stats,
            Err(e) => {
                e.log();
                warn!("Falling back to sample user statistics");
                sample_user_stats()
            }
        }
    }
}

/// Walk the user's repositories and aggregate them.
///
/// Listing, language and topic errors abort the walk; README errors only
/// drop that repository's text detection.
async fn collect_live_aggregate(
    client: &dyn RepositoryApiClient,
    config: &ProfileConfig,
) -> ProfileResult<Aggregate> {
    let repositories = client.list_user_repositories(&config.username).await?;
    let mut analyzer = RepositoryAnalyzer::new(config);

    for repo in repositories {
        if !should_include_repository(&repo.name, repo.fork, config) {
            debug!(repo = %repo.name, "Repository excluded, not fetching details");
            continue;
        }

        let languages = client.get_languages(&repo.owner, &repo.name).await?;
        let topics = client.get_topics(&repo.owner, &repo.name).await?;
        let readme = match client.get_readme(&repo.owner, &repo.name).await {
            Ok(readme) => readme,
            Err(e) => {
                warn!(
                    repo = %repo.name,
                    error = %e,
                    "Error processing README, skipping text analysis"
                );
                None
            }
        };

        analyzer.add(&RepositoryRecord {
            name: repo.name,
            fork: repo.fork,
            stars: repo.stars,
            forks: repo.forks,
            topics,
            description: repo.description,
            readme,
            languages,
        });
    }

    Ok(analyzer.finish())
}
