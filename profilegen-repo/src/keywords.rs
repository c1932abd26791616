//! Static keyword tables used for project classification

/// How a detected keyword is reported on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Tool,
    Framework,
    /// Databases are listed together with frameworks
    Database,
}

/// A keyword scanned for in repository text, and the name it is reported under
#[derive(Debug, Clone, Copy)]
pub struct DetectionKeyword {
    pub keyword: &'static str,
    pub name: &'static str,
    pub classification: Classification,
}

const fn detect(
    keyword: &'static str,
    name: &'static str,
    classification: Classification,
) -> DetectionKeyword {
    DetectionKeyword {
        keyword,
        name,
        classification,
    }
}

/// Project categories and the keywords that place a repository in them.
/// Order matters: it breaks ties between equally common categories.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Web Development",
        &[
            "web", "website", "frontend", "backend", "fullstack", "react", "vue", "angular",
            "node", "express", "django", "flask", "html", "css", "javascript",
        ],
    ),
    (
        "Data Science",
        &[
            "data",
            "analysis",
            "analytics",
            "visualization",
            "machine learning",
            "ml",
            "ai",
            "artificial intelligence",
            "pandas",
            "numpy",
            "jupyter",
            "tensorflow",
            "pytorch",
        ],
    ),
    (
        "Mobile Apps",
        &[
            "mobile",
            "android",
            "ios",
            "app",
            "flutter",
            "react native",
            "swift",
            "kotlin",
        ],
    ),
    (
        "Desktop Applications",
        &["desktop", "gui", "ui", "electron", "qt", "gtk", "wxwidgets"],
    ),
    (
        "DevOps",
        &[
            "devops",
            "ci/cd",
            "pipeline",
            "automation",
            "kubernetes",
            "docker",
            "container",
            "jenkins",
            "github actions",
        ],
    ),
    (
        "Game Development",
        &["game", "unity", "unreal", "godot", "pygame"],
    ),
    (
        "IoT",
        &[
            "iot",
            "internet of things",
            "raspberry pi",
            "arduino",
            "embedded",
        ],
    ),
    (
        "Blockchain",
        &[
            "blockchain",
            "crypto",
            "web3",
            "ethereum",
            "smart contract",
            "solidity",
        ],
    ),
    ("API", &["api", "rest", "graphql", "microservice"]),
    (
        "Security",
        &[
            "security",
            "cybersecurity",
            "encryption",
            "authentication",
            "authorization",
        ],
    ),
    (
        "Automation",
        &["automation", "bot", "script", "scraper", "crawler"],
    ),
    (
        "Education",
        &["education", "learning", "tutorial", "course"],
    ),
    ("Documentation", &["documentation", "docs", "wiki"]),
    (
        "Open Source",
        &["open source", "community", "contribution"],
    ),
];

/// Tools, frameworks and databases recognised in repository text
// Reported under product spelling (`Node.js`, `PostgreSQL`), not the title-cased keyword
pub const DETECTION_KEYWORDS: &[DetectionKeyword] = &[
    detect("docker", "Docker", Classification::Tool),
    detect("kubernetes", "Kubernetes", Classification::Tool),
    detect("django", "Django", Classification::Framework),
    detect("flask", "Flask", Classification::Framework),
    detect("react", "React", Classification::Framework),
    detect("vue", "Vue", Classification::Framework),
    detect("angular", "Angular", Classification::Framework),
    detect("node", "Node.js", Classification::Framework),
    detect("express", "Express", Classification::Framework),
    detect("aws", "AWS", Classification::Tool),
    detect("azure", "Azure", Classification::Tool),
    detect("gcp", "GCP", Classification::Tool),
    detect("terraform", "Terraform", Classification::Tool),
    detect("ansible", "Ansible", Classification::Tool),
    detect("jenkins", "Jenkins", Classification::Tool),
    detect("github actions", "GitHub Actions", Classification::Tool),
    detect("postgresql", "PostgreSQL", Classification::Database),
    detect("mysql", "MySQL", Classification::Database),
    detect("mongodb", "MongoDB", Classification::Database),
    detect("redis", "Redis", Classification::Database),
    detect("sqlite", "SQLite", Classification::Database),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keywords_are_lowercase() {
        for (_, keywords) in CATEGORY_KEYWORDS {
            for keyword in *keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
        for entry in DETECTION_KEYWORDS {
            assert_eq!(entry.keyword, entry.keyword.to_lowercase());
        }
    }

    #[test]
    fn category_names_are_unique() {
        let names: HashSet<_> = CATEGORY_KEYWORDS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), CATEGORY_KEYWORDS.len());
    }

    #[test]
    fn detections_use_product_spelling() {
        let name_of = |keyword: &str| {
            DETECTION_KEYWORDS
                .iter()
                .find(|d| d.keyword == keyword)
                .map(|d| d.name)
        };
        assert_eq!(name_of("node"), Some("Node.js"));
        assert_eq!(name_of("aws"), Some("AWS"));
        assert_eq!(name_of("github actions"), Some("GitHub Actions"));
        assert_eq!(name_of("postgresql"), Some("PostgreSQL"));
    }

    #[test]
    fn docker_is_both_category_and_tool_keyword() {
        let devops = CATEGORY_KEYWORDS
            .iter()
            .find(|(name, _)| *name == "DevOps")
            .map(|(_, keywords)| *keywords)
            .unwrap();
        assert!(devops.contains(&"docker"));
        assert!(DETECTION_KEYWORDS
            .iter()
            .any(|d| d.keyword == "docker" && d.classification == Classification::Tool));
    }
}
