//! Run-scoped configuration
//!
//! Layered as defaults, then an optional TOML file, then the environment, then CLI flags.

use crate::error::{ErrorContext, ProfileError, ProfileResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Username used when neither the config nor the environment names one
pub const DEFAULT_USERNAME: &str = "Tibutti";

/// Maximum number of languages shown on the profile
pub const DEFAULT_MAX_LANGUAGES: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Account whose repositories are analyzed
    pub username: String,
    /// Platform access token; absence selects sample-data mode
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    /// Base URL of the platform REST API
    pub api_base_url: String,
    /// Where the rendered profile is written
    pub output_path: PathBuf,
    /// Repository names that never contribute to any count
    pub exclude_repos: Vec<String>,
    /// Languages left out of the language totals
    pub exclude_languages: Vec<String>,
    pub max_languages: usize,
    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            access_token: None,
            api_base_url: "https://api.github.com".to_string(),
            output_path: PathBuf::from("README.md"),
            exclude_repos: Vec::new(),
            exclude_languages: Vec::new(),
            max_languages: DEFAULT_MAX_LANGUAGES,
            timeout_seconds: 30,
            user_agent: format!("profilegen/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Subset of a GitHub Actions event payload
#[derive(Debug, Deserialize)]
struct ActionsEvent {
    repository: Option<ActionsRepository>,
}

#[derive(Debug, Deserialize)]
struct ActionsRepository {
    owner: Option<ActionsOwner>,
}

#[derive(Debug, Deserialize)]
struct ActionsOwner {
    login: Option<String>,
}

impl ProfileConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ProfileResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ProfileError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: ProfileConfig = toml::from_str(&content).map_err(|e| ProfileError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file. The access token is never written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ProfileResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ProfileError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content).map_err(|e| ProfileError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Default config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|d| d.join("profilegen").join("config.toml")),
            dirs::home_dir().map(|d| d.join(".profilegen").join("config.toml")),
            Some(PathBuf::from("profilegen.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an environment lookup.
    ///
    /// `GITHUB_REPOSITORY` (`owner/repo`) wins over the `GITHUB_EVENT_PATH`
    /// payload's `repository.owner.login`; `GITHUB_TOKEN` supplies the credential.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_repository = lookup("GITHUB_REPOSITORY")
            .and_then(|repo| repo.split('/').next().map(str::to_string))
            .filter(|owner| !owner.is_empty());

        let username = from_repository.or_else(|| {
            lookup("GITHUB_EVENT_PATH")
                .filter(|path| !path.is_empty())
                .and_then(|path| owner_from_event_file(Path::new(&path)))
        });

        if let Some(username) = username {
            self.username = username;
        }

        if let Some(token) = lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()) {
            self.access_token = Some(token);
        }
    }

    /// Whether live API access is configured
    pub fn has_credential(&self) -> bool {
        self.access_token.is_some()
    }

    /// Validate configuration
    pub fn validate(&self) -> ProfileResult<()> {
        if self.username.trim().is_empty() {
            return Err(crate::validation_error!(
                "Username must not be empty",
                "username",
                "config"
            ));
        }

        if self.max_languages == 0 {
            return Err(ProfileError::Config {
                message: "max_languages must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set max_languages to a positive value"),
            });
        }

        if self.timeout_seconds == 0 {
            return Err(ProfileError::Config {
                message: "timeout_seconds must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set timeout_seconds to a positive value"),
            });
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(crate::validation_error!(
                format!("API base URL must be http(s): {}", self.api_base_url),
                "api_base_url",
                "config"
            ));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(crate::validation_error!(
                "Output path must not be empty",
                "output_path",
                "config"
            ));
        }

        Ok(())
    }
}

fn owner_from_event_file(path: &Path) -> Option<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot read event payload");
            return None;
        }
    };

    match serde_json::from_str::<ActionsEvent>(&content) {
        Ok(event) => event
            .repository
            .and_then(|r| r.owner)
            .and_then(|o| o.login)
            .filter(|login| !login.is_empty()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot parse event payload");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProfileConfig::default();
        assert_eq!(config.username, DEFAULT_USERNAME);
        assert_eq!(config.max_languages, 15);
        assert_eq!(config.output_path, PathBuf::from("README.md"));
        assert!(!config.has_credential());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_repository_owner_and_token() {
        let mut config = ProfileConfig::default();
        config.apply_env_from(env(&[
            ("GITHUB_REPOSITORY", "octocat/octocat"),
            ("GITHUB_TOKEN", "ghp_secret"),
        ]));

        assert_eq!(config.username, "octocat");
        assert_eq!(config.access_token.as_deref(), Some("ghp_secret"));
    }

    #[test]
    fn test_empty_token_keeps_sample_mode() {
        let mut config = ProfileConfig::default();
        config.apply_env_from(env(&[("GITHUB_TOKEN", "")]));
        assert!(!config.has_credential());
    }

    #[test]
    fn test_env_event_payload_owner() {
        let dir = TempDir::new().unwrap();
        let event_path = dir.path().join("event.json");
        std::fs::write(
            &event_path,
            r#"{"repository": {"owner": {"login": "from-event"}}}"#,
        )
        .unwrap();

        let mut config = ProfileConfig::default();
        config.apply_env_from(env(&[(
            "GITHUB_EVENT_PATH",
            event_path.to_str().unwrap(),
        )]));
        assert_eq!(config.username, "from-event");
    }

    #[test]
    fn test_unreadable_event_payload_keeps_username() {
        let mut config = ProfileConfig {
            username: "configured".to_string(),
            ..Default::default()
        };
        config.apply_env_from(env(&[("GITHUB_EVENT_PATH", "/nonexistent/event.json")]));
        assert_eq!(config.username, "configured");
    }

    #[test]
    fn test_save_omits_token_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ProfileConfig {
            username: "someone".to_string(),
            access_token: Some("ghp_secret".to_string()),
            exclude_repos: vec!["someone".to_string()],
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("ghp_secret"));

        let loaded = ProfileConfig::from_file(&path).unwrap();
        assert_eq!(loaded.username, "someone");
        assert_eq!(loaded.exclude_repos, vec!["someone".to_string()]);
        assert!(loaded.access_token.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "username = \"partial\"\nmax_languages = 5\n").unwrap();

        let config = ProfileConfig::from_file(&path).unwrap();
        assert_eq!(config.username, "partial");
        assert_eq!(config.max_languages, 5);
        assert_eq!(config.api_base_url, "https://api.github.com");
    }

    #[test]
    fn test_validation_failures() {
        let config = ProfileConfig {
            max_languages: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ProfileError::Config { .. })));

        let config = ProfileConfig {
            username: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ProfileError::Validation { .. })
        ));

        let config = ProfileConfig {
            api_base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
