//! API clients for the code hosting platform
//!
//! The platform is an external service reached through the narrow
//! [`RepositoryApiClient`] interface; everything else in the pipeline works on
//! plain records.

use async_trait::async_trait;
use profilegen_core::{ErrorContext, ProfileConfig, ProfileError, ProfileResult, UserStats};
use std::collections::HashMap;

pub mod github;


pub use github::GitHubApiClient;

/// Repository entry as returned by the "list repositories" call
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySummary {
    /// Login of the owning account
    pub owner: String,
    pub name: String,
    pub fork: bool,
    pub stars: u64,
    pub forks: u64,
    pub description: Option<String>,
}

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Access token for authentication
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Additional headers
    pub headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: None,
            timeout_seconds: 30,
            user_agent: format!("profilegen/{}", env!("CARGO_PKG_VERSION")),
            headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration for GitHub
    pub fn github(access_token: Option<String>) -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            access_token,
            ..Default::default()
        }
    }

    /// Derive the client configuration from the run configuration
    pub fn from_profile_config(config: &ProfileConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            access_token: config.access_token.clone(),
            timeout_seconds: config.timeout_seconds,
            user_agent: config.user_agent.clone(),
            headers: HashMap::new(),
        }
    }

    /// Set additional header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Trait for platform API clients
#[async_trait]
pub trait RepositoryApiClient: Send + Sync {
    /// List every repository owned by the user, following pagination
    async fn list_user_repositories(&self, username: &str) -> ProfileResult<Vec<RepositorySummary>>;

    /// Per-language byte counts of a repository
    async fn get_languages(&self, owner: &str, repo: &str) -> ProfileResult<Vec<(String, u64)>>;

    /// Topics attached to a repository
    async fn get_topics(&self, owner: &str, repo: &str) -> ProfileResult<Vec<String>>;

    /// README content; `Ok(None)` when the repository has none
    async fn get_readme(&self, owner: &str, repo: &str) -> ProfileResult<Option<String>>;

    /// Public profile statistics of the user
    async fn get_user(&self, username: &str) -> ProfileResult<UserStats>;
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> ProfileResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            ProfileError::Config {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    for (key, value) in &config.headers {
        let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            ProfileError::Config {
                message: format!("Invalid header name '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?;

        let header_value =
            reqwest::header::HeaderValue::from_str(value).map_err(|e| ProfileError::Config {
                message: format!("Invalid header value for '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            })?;

        headers.insert(header_name, header_value);
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| ProfileError::Config {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Turn a non-success HTTP response into an API error
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    operation: &str,
) -> ProfileError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();

    ProfileError::Api {
        message: format!(
            "HTTP {} error for {}: {}",
            status.as_u16(),
            url,
            if error_body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error")
            } else {
                &error_body
            }
        ),
        source: None,
        context: ErrorContext::new("api_client")
            .with_operation(operation)
            .with_metadata("status", &status.as_u16().to_string())
            .with_suggestion(status_suggestion(status.as_u16())),
    }
}

pub(crate) fn status_suggestion(status: u16) -> &'static str {
    match status {
        401 => "Check your access token",
        403 => "Check token scopes or API rate limits",
        404 => "User or repository not found or not accessible",
        _ => "Check network connectivity and API status",
    }
}
