//! GitHub API client implementation

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use log::{debug, info};
use profilegen_core::{ErrorContext, ProfileError, ProfileResult, UserStats};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

use super::{
    create_http_client, handle_response_error, ApiClientConfig, RepositoryApiClient,
    RepositorySummary,
};

/// Page size used when listing repositories (GitHub maximum)
const PER_PAGE: usize = 100;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const ACCEPT_TOPICS: &str = "application/vnd.github.mercy-preview+json";

/// GitHub API client
pub struct GitHubApiClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

/// GitHub repository list item
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubRepository {
    pub(crate) name: String,
    pub(crate) owner: GitHubOwner,
    #[serde(default)]
    pub(crate) fork: bool,
    #[serde(default)]
    pub(crate) stargazers_count: u64,
    #[serde(default)]
    pub(crate) forks_count: u64,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubOwner {
    pub(crate) login: String,
}

impl From<GitHubRepository> for RepositorySummary {
    fn from(repo: GitHubRepository) -> Self {
        Self {
            owner: repo.owner.login,
            name: repo.name,
            fork: repo.fork,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            description: repo.description,
        }
    }
}

/// GitHub topics response
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubTopicsResponse {
    #[serde(default)]
    pub(crate) names: Vec<String>,
}

/// GitHub README response
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubReadmeResponse {
    pub(crate) content: String,
    pub(crate) encoding: String,
}

/// GitHub user response
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubUser {
    #[serde(default)]
    pub(crate) public_repos: u64,
    #[serde(default)]
    pub(crate) followers: u64,
    #[serde(default)]
    pub(crate) following: u64,
    pub(crate) created_at: Option<DateTime<Utc>>,
}

impl From<GitHubUser> for UserStats {
    fn from(user: GitHubUser) -> Self {
        Self {
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            created_at: user.created_at,
        }
    }
}

/// Language breakdown keeping the order GitHub reports (largest first)
#[derive(Debug, Default, PartialEq)]
pub(crate) struct LanguageBreakdown(pub(crate) Vec<(String, u64)>);

impl<'de> Deserialize<'de> for LanguageBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = LanguageBreakdown;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of language names to byte counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut languages = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((language, bytes)) = map.next_entry::<String, u64>()? {
                    languages.push((language, bytes));
                }
                Ok(LanguageBreakdown(languages))
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(config: ApiClientConfig) -> ProfileResult<Self> {
        let client = create_http_client(&config)?;

        info!("Created GitHub API client for {}", config.base_url);

        Ok(Self { client, config })
    }

    /// Create authorization headers
    fn create_auth_headers(&self, accept: &str) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Some(ref token) = self.config.access_token {
            if let Ok(auth_value) =
                reqwest::header::HeaderValue::from_str(&format!("token {}", token))
            {
                headers.insert(reqwest::header::AUTHORIZATION, auth_value);
            }
        }

        if let Ok(accept_value) = reqwest::header::HeaderValue::from_str(accept) {
            headers.insert(reqwest::header::ACCEPT, accept_value);
        }

        headers
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Send a GET request, returning the raw response whatever its status
    async fn send(
        &self,
        endpoint: &str,
        accept: &str,
        operation: &str,
    ) -> ProfileResult<reqwest::Response> {
        let url = self.endpoint_url(endpoint);

        debug!("Making GitHub API request to: {}", url);

        self.client
            .get(&url)
            .headers(self.create_auth_headers(accept))
            .send()
            .await
            .map_err(|e| ProfileError::Network {
                message: format!("Failed to make request to GitHub API: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client")
                    .with_operation(operation)
                    .with_metadata("url", &url),
            })
    }

    /// GET an endpoint and decode its JSON body
    async fn get_json<T>(&self, endpoint: &str, accept: &str, operation: &str) -> ProfileResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(endpoint, accept, operation).await?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, operation).await);
        }

        response.json::<T>().await.map_err(|e| ProfileError::Decode {
            message: format!("Failed to parse {} response: {}", operation, e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_api_client").with_operation(operation),
        })
    }
}

/// Decode base64 content from GitHub API
pub(crate) fn decode_base64_content(content: &str) -> ProfileResult<String> {
    let cleaned_content = content.replace(['\n', '\r', ' '], "");

    let decoded_bytes = BASE64
        .decode(&cleaned_content)
        .map_err(|e| ProfileError::Decode {
            message: format!("Failed to decode base64 content: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_api_client")
                .with_operation("decode_base64_content"),
        })?;

    String::from_utf8(decoded_bytes).map_err(|e| ProfileError::Decode {
        message: format!("Content is not valid UTF-8: {}", e),
        source: Some(Box::new(e)),
        context: ErrorContext::new("github_api_client").with_operation("decode_base64_content"),
    })
}

#[async_trait]
impl RepositoryApiClient for GitHubApiClient {
    async fn list_user_repositories(&self, username: &str) -> ProfileResult<Vec<RepositorySummary>> {
        info!("Listing GitHub repositories for {}", username);

        let mut repositories = Vec::new();
        let mut page = 1;

        loop {
            let endpoint = format!(
                "users/{}/repos?type=owner&per_page={}&page={}",
                username, PER_PAGE, page
            );
            let batch: Vec<GitHubRepository> = self
                .get_json(&endpoint, ACCEPT_V3, "list_user_repositories")
                .await?;

            let batch_len = batch.len();
            repositories.extend(batch.into_iter().map(RepositorySummary::from));

            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }

        info!(
            "Retrieved {} repositories for {} ({} page(s))",
            repositories.len(),
            username,
            page
        );
        Ok(repositories)
    }

    async fn get_languages(&self, owner: &str, repo: &str) -> ProfileResult<Vec<(String, u64)>> {
        debug!("Fetching GitHub languages for {}/{}", owner, repo);

        let endpoint = format!("repos/{}/{}/languages", owner, repo);
        let breakdown: LanguageBreakdown =
            self.get_json(&endpoint, ACCEPT_V3, "get_languages").await?;

        Ok(breakdown.0)
    }

    async fn get_topics(&self, owner: &str, repo: &str) -> ProfileResult<Vec<String>> {
        debug!("Fetching GitHub topics for {}/{}", owner, repo);

        let endpoint = format!("repos/{}/{}/topics", owner, repo);
        let topics: GitHubTopicsResponse =
            self.get_json(&endpoint, ACCEPT_TOPICS, "get_topics").await?;

        Ok(topics.names)
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> ProfileResult<Option<String>> {
        debug!("Fetching GitHub README for {}/{}", owner, repo);

        let endpoint = format!("repos/{}/{}/readme", owner, repo);
        let response = self.send(&endpoint, ACCEPT_V3, "get_readme").await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!("README not found for {}/{}", owner, repo);
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(handle_response_error(response, "get_readme").await);
        }

        let readme_response: GitHubReadmeResponse =
            response.json().await.map_err(|e| ProfileError::Decode {
                message: format!("Failed to parse README response: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("get_readme"),
            })?;

        if readme_response.encoding != "base64" {
            return Err(ProfileError::Decode {
                message: format!("Unexpected README encoding: {}", readme_response.encoding),
                source: None,
                context: ErrorContext::new("github_api_client")
                    .with_operation("get_readme")
                    .with_suggestion("Expected base64 encoding from GitHub API"),
            });
        }

        decode_base64_content(&readme_response.content).map(Some)
    }

    async fn get_user(&self, username: &str) -> ProfileResult<UserStats> {
        info!("Fetching GitHub profile for {}", username);

        let endpoint = format!("users/{}", username);
        let user: GitHubUser = self.get_json(&endpoint, ACCEPT_V3, "get_user").await?;

        Ok(user.into())
    }
}
