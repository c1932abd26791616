//! Canned profile data used when the platform API is unavailable

use chrono::{DateTime, Utc};
use profilegen_core::{Aggregate, RepoTotals, UserStats};

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Fixed aggregate returned in sample mode
pub fn sample_aggregate() -> Aggregate {
    Aggregate {
        languages: [
            ("Python", 50000),
            ("JavaScript", 30000),
            ("HTML", 10000),
            ("CSS", 8000),
            ("TypeScript", 5000),
            ("Java", 3000),
        ]
        .iter()
        .map(|(language, bytes)| (language.to_string(), *bytes))
        .collect(),
        tools: owned(&["Git", "Docker", "VS Code", "GitHub Actions", "AWS"]),
        frameworks: owned(&["React", "Django", "Flask", "Node.js", "Express"]),
        project_categories: [
            ("Web Development", 5),
            ("Data Science", 3),
            ("Mobile Apps", 2),
            ("Automation", 2),
        ]
        .iter()
        .map(|(category, count)| (category.to_string(), *count))
        .collect(),
        topics: owned(&["web-app", "data-analysis", "api", "automation", "mobile"]),
        stats: RepoTotals {
            total_repos: 12,
            total_stars: 48,
            total_forks: 15,
        },
    }
}

/// Fixed user statistics returned in sample mode
pub fn sample_user_stats() -> UserStats {
    UserStats {
        public_repos: 15,
        followers: 45,
        following: 32,
        // 2020-01-01T00:00:00Z
        created_at: DateTime::<Utc>::from_timestamp(1_577_836_800, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_aggregate_contents() {
        let aggregate = sample_aggregate();
        assert_eq!(aggregate.languages[0], ("Python".to_string(), 50000));
        assert_eq!(aggregate.languages[1], ("JavaScript".to_string(), 30000));
        assert_eq!(aggregate.languages.len(), 6);
        assert_eq!(aggregate.top_category(), Some("Web Development"));
        assert_eq!(aggregate.stats.total_stars, 48);
    }

    #[test]
    fn test_sample_user_created_at() {
        let stats = sample_user_stats();
        assert_eq!(
            stats.created_at.map(|t| t.to_rfc3339()),
            Some("2020-01-01T00:00:00+00:00".to_string())
        );
    }
}
