//! Repository analyzer for extracting profile statistics
//!
//! Folds repository records into an [`Aggregate`]: language byte totals,
//! project categories, topics, detected tools and frameworks, and totals.

use std::collections::BTreeSet;

use profilegen_core::{Aggregate, ProfileConfig, RepoTotals, RepositoryRecord};
use tracing::{debug, info};

use crate::filter::{should_count_language, should_include_repository};
use crate::keywords::{Classification, CATEGORY_KEYWORDS, DETECTION_KEYWORDS};

/// Number of project categories kept in the aggregate
pub const MAX_CATEGORIES: usize = 5;

/// Number of topics kept in the aggregate
pub const MAX_TOPICS: usize = 8;

/// Counter that ranks by count, breaking ties by first insertion
#[derive(Debug, Default)]
struct RankedCounter {
    entries: Vec<(String, u64)>,
}

impl RankedCounter {
    fn add(&mut self, key: &str, amount: u64) {
        match self.entries.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, count)) => *count += amount,
            None => self.entries.push((key.to_string(), amount)),
        }
    }

    fn most_common(mut self, limit: usize) -> Vec<(String, u64)> {
        // Stable sort keeps first-seen order among equal counts
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries.truncate(limit);
        self.entries
    }
}

/// Incremental aggregation over repository records
pub struct RepositoryAnalyzer<'a> {
    config: &'a ProfileConfig,
    languages: RankedCounter,
    categories: RankedCounter,
    topics: RankedCounter,
    tools: BTreeSet<String>,
    frameworks: BTreeSet<String>,
    totals: RepoTotals,
}

impl<'a> RepositoryAnalyzer<'a> {
    pub fn new(config: &'a ProfileConfig) -> Self {
        Self {
            config,
            languages: RankedCounter::default(),
            categories: RankedCounter::default(),
            topics: RankedCounter::default(),
            tools: BTreeSet::new(),
            frameworks: BTreeSet::new(),
            totals: RepoTotals::default(),
        }
    }

    /// Add one repository. Returns false when the record was excluded.
    pub fn add(&mut self, record: &RepositoryRecord) -> bool {
        if !should_include_repository(&record.name, record.fork, self.config) {
            debug!(repo = %record.name, fork = record.fork, "Skipping repository");
            return false;
        }

        self.totals.total_repos += 1;
        self.totals.total_stars += record.stars;
        self.totals.total_forks += record.forks;

        for (language, bytes) in &record.languages {
            if should_count_language(language, self.config) {
                self.languages.add(language, *bytes);
            }
        }

        for topic in &record.topics {
            self.topics.add(topic, 1);
        }

        match record.readme.as_deref() {
            Some(readme) => {
                let text = searchable_text(record, readme);
                self.detect_categories(&text);
                self.detect_tools(&text);
            }
            None => {
                debug!(repo = %record.name, "No README, skipping text detection");
            }
        }

        true
    }

    /// Count each category at most once for this text; first matching keyword wins
    fn detect_categories(&mut self, text: &str) {
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.iter().any(|keyword| text.contains(keyword)) {
                self.categories.add(category, 1);
            }
        }
    }

    fn detect_tools(&mut self, text: &str) {
        for detection in DETECTION_KEYWORDS {
            if !text.contains(detection.keyword) {
                continue;
            }
            let target = match detection.classification {
                Classification::Tool => &mut self.tools,
                Classification::Framework | Classification::Database => &mut self.frameworks,
            };
            target.insert(detection.name.to_string());
        }
    }

    /// Produce the ranked aggregate
    pub fn finish(self) -> Aggregate {
        let aggregate = Aggregate {
            languages: self.languages.most_common(self.config.max_languages),
            tools: self.tools.into_iter().collect(),
            frameworks: self.frameworks.into_iter().collect(),
            project_categories: self.categories.most_common(MAX_CATEGORIES),
            topics: self
                .topics
                .most_common(MAX_TOPICS)
                .into_iter()
                .map(|(topic, _)| topic)
                .collect(),
            stats: self.totals,
        };

        info!(
            repos = aggregate.stats.total_repos,
            languages = aggregate.languages.len(),
            categories = aggregate.project_categories.len(),
            tools = aggregate.tools.len(),
            frameworks = aggregate.frameworks.len(),
            "Repository analysis complete"
        );

        aggregate
    }
}

/// Lowercased `description readme name topics` text used for keyword matching
fn searchable_text(record: &RepositoryRecord, readme: &str) -> String {
    format!(
        "{} {} {} {}",
        record.description.as_deref().unwrap_or_default(),
        readme,
        record.name,
        record.topics.join(" ")
    )
    .to_lowercase()
}

/// Aggregate a sequence of repository records
pub fn analyze_repositories<'r, I>(records: I, config: &ProfileConfig) -> Aggregate
where
    I: IntoIterator<Item = &'r RepositoryRecord>,
{
    let mut analyzer = RepositoryAnalyzer::new(config);
    for record in records {
        analyzer.add(record);
    }
    analyzer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            readme: Some(String::new()),
            ..Default::default()
        }
    }

    fn langs(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|(l, b)| (l.to_string(), *b)).collect()
    }

    #[test]
    fn test_language_totals_are_ranked() {
        let records = vec![
            RepositoryRecord {
                languages: langs(&[("Python", 100), ("Shell", 10)]),
                ..record("a")
            },
            RepositoryRecord {
                languages: langs(&[("Rust", 500), ("Python", 300)]),
                ..record("b")
            },
        ];

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        assert_eq!(
            aggregate.languages,
            langs(&[("Rust", 500), ("Python", 400), ("Shell", 10)])
        );
    }

    #[test]
    fn test_language_list_is_truncated() {
        let config = ProfileConfig {
            max_languages: 2,
            ..Default::default()
        };
        let records = vec![RepositoryRecord {
            languages: langs(&[("C", 1), ("Go", 3), ("Zig", 2)]),
            ..record("a")
        }];

        let aggregate = analyze_repositories(&records, &config);
        assert_eq!(aggregate.languages, langs(&[("Go", 3), ("Zig", 2)]));
    }

    #[test]
    fn test_equal_language_counts_keep_first_seen_order() {
        let records = vec![RepositoryRecord {
            languages: langs(&[("Lua", 5), ("Nix", 5), ("Elm", 9)]),
            ..record("a")
        }];

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        assert_eq!(
            aggregate.languages,
            langs(&[("Elm", 9), ("Lua", 5), ("Nix", 5)])
        );
    }

    #[test]
    fn test_excluded_and_forked_repositories_never_count() {
        let config = ProfileConfig {
            exclude_repos: vec!["secret".to_string()],
            ..Default::default()
        };
        let records = vec![
            RepositoryRecord {
                stars: 3,
                forks: 1,
                topics: vec!["cli".to_string()],
                languages: langs(&[("Rust", 10)]),
                readme: Some("a docker cli".to_string()),
                ..record("kept")
            },
            RepositoryRecord {
                fork: true,
                stars: 100,
                forks: 50,
                topics: vec!["web".to_string()],
                languages: langs(&[("Python", 1000)]),
                readme: Some("react website".to_string()),
                ..record("forked")
            },
            RepositoryRecord {
                stars: 7,
                topics: vec!["game".to_string()],
                languages: langs(&[("C#", 9999)]),
                readme: Some("unity game".to_string()),
                ..record("secret")
            },
        ];

        let aggregate = analyze_repositories(&records, &config);
        assert_eq!(
            aggregate.stats,
            RepoTotals {
                total_repos: 1,
                total_stars: 3,
                total_forks: 1
            }
        );
        assert_eq!(aggregate.languages, langs(&[("Rust", 10)]));
        assert_eq!(aggregate.topics, vec!["cli".to_string()]);
        assert_eq!(aggregate.tools, vec!["Docker".to_string()]);
        assert!(aggregate.frameworks.is_empty());
        assert!(aggregate
            .project_categories
            .iter()
            .all(|(c, _)| c != "Web Development" && c != "Game Development"));
    }

    #[test]
    fn test_excluded_languages_are_dropped() {
        let config = ProfileConfig {
            exclude_languages: vec!["HTML".to_string()],
            ..Default::default()
        };
        let records = vec![RepositoryRecord {
            languages: langs(&[("HTML", 900), ("Go", 10)]),
            ..record("site")
        }];

        let aggregate = analyze_repositories(&records, &config);
        assert_eq!(aggregate.languages, langs(&[("Go", 10)]));
    }

    #[test]
    fn test_category_counted_once_per_repository() {
        // "web", "website", "frontend" and "react" all belong to Web Development
        let records = vec![RepositoryRecord {
            description: Some("Website frontend".to_string()),
            readme: Some("A React web thing".to_string()),
            ..record("site")
        }];

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        let web = aggregate
            .project_categories
            .iter()
            .find(|(c, _)| c == "Web Development")
            .map(|(_, n)| *n);
        assert_eq!(web, Some(1));
    }

    #[test]
    fn test_name_and_topics_feed_detection() {
        let records = vec![RepositoryRecord {
            topics: vec!["graphql".to_string()],
            readme: Some(String::new()),
            ..record("terraform-modules")
        }];

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        assert!(aggregate
            .project_categories
            .iter()
            .any(|(c, _)| c == "API"));
        assert_eq!(aggregate.tools, vec!["Terraform".to_string()]);
    }

    #[test]
    fn test_missing_readme_skips_text_detection_only() {
        let records = vec![RepositoryRecord {
            description: Some("docker react api".to_string()),
            readme: None,
            stars: 4,
            forks: 2,
            topics: vec!["api".to_string()],
            languages: langs(&[("TypeScript", 50)]),
            ..record("no-readme")
        }];

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        assert!(aggregate.project_categories.is_empty());
        assert!(aggregate.tools.is_empty());
        assert!(aggregate.frameworks.is_empty());
        assert_eq!(aggregate.stats.total_repos, 1);
        assert_eq!(aggregate.stats.total_stars, 4);
        assert_eq!(aggregate.stats.total_forks, 2);
        assert_eq!(aggregate.topics, vec!["api".to_string()]);
        assert_eq!(aggregate.languages, langs(&[("TypeScript", 50)]));
    }

    #[test]
    fn test_shared_keywords_count_in_both_tables() {
        let records = vec![RepositoryRecord {
            readme: Some("Runs in docker".to_string()),
            ..record("svc")
        }];

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        assert!(aggregate
            .project_categories
            .iter()
            .any(|(c, n)| c == "DevOps" && *n == 1));
        assert_eq!(aggregate.tools, vec!["Docker".to_string()]);
    }

    #[test]
    fn test_tools_and_frameworks_are_sorted_sets() {
        let records = vec![
            RepositoryRecord {
                readme: Some("redis, kubernetes, flask".to_string()),
                ..record("a")
            },
            RepositoryRecord {
                readme: Some("aws docker django flask".to_string()),
                ..record("b")
            },
        ];

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        assert_eq!(aggregate.tools, vec!["AWS", "Docker", "Kubernetes"]);
        assert_eq!(aggregate.frameworks, vec!["Django", "Flask", "Redis"]);
    }

    #[test]
    fn test_category_and_topic_limits() {
        let readmes = [
            "website", "data", "mobile", "desktop", "devops", "game", "iot", "blockchain",
        ];
        let records: Vec<RepositoryRecord> = readmes
            .iter()
            .enumerate()
            .map(|(i, readme)| RepositoryRecord {
                readme: Some(readme.to_string()),
                topics: (0..=i).map(|t| format!("topic-{}", t)).collect(),
                ..record(&format!("repo-{}", i))
            })
            .collect();

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        assert!(aggregate.project_categories.len() <= MAX_CATEGORIES);
        assert_eq!(aggregate.topics.len(), MAX_TOPICS);
        // topic-0 appears in every repository, topic-7 only in the last
        assert_eq!(aggregate.topics[0], "topic-0");
        assert_eq!(aggregate.topics[7], "topic-7");
    }

    #[test]
    fn test_categories_ranked_by_count() {
        let records = vec![
            RepositoryRecord {
                readme: Some("a game".to_string()),
                ..record("one")
            },
            RepositoryRecord {
                readme: Some("another game with a bot".to_string()),
                ..record("two")
            },
        ];

        let aggregate = analyze_repositories(&records, &ProfileConfig::default());
        assert_eq!(aggregate.top_category(), Some("Game Development"));
        assert_eq!(aggregate.project_categories[0].1, 2);
    }

    #[test]
    fn test_empty_input() {
        let aggregate = analyze_repositories(&[], &ProfileConfig::default());
        assert_eq!(aggregate, Aggregate::default());
    }
}
