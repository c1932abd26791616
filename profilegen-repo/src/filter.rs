//! Repository and language filtering

use profilegen_core::ProfileConfig;

/// Check if a repository should contribute to the profile.
///
/// Forks and repositories named in `exclude_repos` never count.
pub fn should_include_repository(name: &str, fork: bool, config: &ProfileConfig) -> bool {
    if fork {
        return false;
    }

    !config.exclude_repos.iter().any(|excluded| excluded == name)
}

/// Check if a language should be added to the language totals
pub fn should_count_language(language: &str, config: &ProfileConfig) -> bool {
    !config
        .exclude_languages
        .iter()
        .any(|excluded| excluded == language)
}
