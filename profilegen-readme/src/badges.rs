//! shields.io badges for languages, frameworks and tools
//!
//! Names missing from [`BADGE_STYLES`] fall back to a logo slug derived from
//! the name (lowercased, spaces removed), colour `007ec6` and a white logo.

/// Badge colour used when a name has no entry in the style table
pub const DEFAULT_BADGE_COLOR: &str = "007ec6";

/// Logo colour used when a style does not set one
pub const DEFAULT_LOGO_COLOR: &str = "white";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStyle {
    /// simple-icons slug
    pub logo: &'static str,
    /// Background colour, hex without `#`
    pub color: &'static str,
    pub logo_color: Option<&'static str>,
}

const fn style(logo: &'static str, color: &'static str) -> BadgeStyle {
    BadgeStyle {
        logo,
        color,
        logo_color: None,
    }
}

const fn dark_logo(logo: &'static str, color: &'static str) -> BadgeStyle {
    BadgeStyle {
        logo,
        color,
        logo_color: Some("black"),
    }
}

/// Known badge styles keyed by display name
pub const BADGE_STYLES: &[(&str, BadgeStyle)] = &[
    // Languages
    ("Python", style("python", "3776AB")),
    ("JavaScript", dark_logo("javascript", "F7DF1E")),
    ("TypeScript", style("typescript", "3178C6")),
    ("HTML", style("html5", "E34F26")),
    ("CSS", style("css3", "1572B6")),
    ("Java", style("java", "007396")),
    ("C#", style("csharp", "239120")),
    ("C++", style("cplusplus", "00599C")),
    ("PHP", style("php", "777BB4")),
    ("Ruby", style("ruby", "CC342D")),
    ("Swift", style("swift", "FA7343")),
    ("Go", style("go", "00ADD8")),
    ("Rust", style("rust", "000000")),
    ("Kotlin", style("kotlin", "0095D5")),
    ("Dart", style("dart", "0175C2")),
    ("Shell", style("gnubash", "4EAA25")),
    ("Jupyter Notebook", style("jupyter", "F37626")),
    ("R", style("r", "276DC3")),
    // Frameworks
    ("Vue", style("vuedotjs", "4FC08D")),
    ("React", dark_logo("react", "61DAFB")),
    ("Angular", style("angular", "DD0031")),
    ("Django", style("django", "092E20")),
    ("Flask", style("flask", "000000")),
    ("Node.js", style("nodedotjs", "339933")),
    ("Express", style("express", "000000")),
    // Tools
    ("Git", style("git", "F05032")),
    ("GitHub", style("github", "181717")),
    ("GitHub Actions", style("githubactions", "2088FF")),
    ("GitLab", style("gitlab", "FCA121")),
    ("Docker", style("docker", "2496ED")),
    ("Kubernetes", style("kubernetes", "326CE5")),
    ("Terraform", style("terraform", "7B42BC")),
    ("Ansible", style("ansible", "EE0000")),
    ("Jenkins", style("jenkins", "D24939")),
    ("VS Code", style("visualstudiocode", "007ACC")),
    ("IntelliJ IDEA", style("intellijidea", "000000")),
    ("PyCharm", style("pycharm", "000000")),
    ("npm", style("npm", "CB3837")),
    ("Yarn", style("yarn", "2C8EBB")),
    ("AWS", style("amazonaws", "232F3E")),
    ("Azure", style("microsoftazure", "0078D4")),
    ("GCP", style("googlecloud", "4285F4")),
    ("Heroku", style("heroku", "430098")),
    ("Netlify", style("netlify", "00C7B7")),
    ("Vercel", style("vercel", "000000")),
    // Databases
    ("PostgreSQL", style("postgresql", "336791")),
    ("MySQL", style("mysql", "4479A1")),
    ("MongoDB", style("mongodb", "47A248")),
    ("Redis", style("redis", "DC382D")),
    ("SQLite", style("sqlite", "003B57")),
];

/// Look up the style for a display name (exact match)
pub fn badge_style(name: &str) -> Option<&'static BadgeStyle> {
    BADGE_STYLES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, style)| style)
}

fn default_logo(name: &str) -> String {
    name.replace(' ', "").to_lowercase()
}

/// Badge label escaped for the shields.io static badge path.
///
/// Dashes and underscores are doubled because shields.io treats them as
/// separators, then the label is percent-encoded.
fn badge_label(name: &str) -> String {
    let escaped = name.replace('-', "--").replace('_', "__");
    urlencoding::encode(&escaped).into_owned()
}

/// Badge for a programming language
pub fn language_badge(language: &str) -> String {
    let style = badge_style(language);
    let logo = style
        .map(|s| s.logo.to_string())
        .unwrap_or_else(|| default_logo(language));
    let color = style.map(|s| s.color).unwrap_or(DEFAULT_BADGE_COLOR);
    let logo_color = style
        .and_then(|s| s.logo_color)
        .unwrap_or(DEFAULT_LOGO_COLOR);

    format!(
        "![{}](https://img.shields.io/badge/{}-{}?style=for-the-badge&logo={}&logoColor={})",
        language,
        badge_label(language),
        color,
        logo,
        logo_color
    )
}

/// Badge for a framework, tool or database
pub fn tool_badge(tool: &str) -> String {
    let style = badge_style(tool);
    let logo = style
        .map(|s| s.logo.to_string())
        .unwrap_or_else(|| default_logo(tool));
    let color = style.map(|s| s.color).unwrap_or(DEFAULT_BADGE_COLOR);

    format!(
        "![{}](https://img.shields.io/badge/{}-{}?style=for-the-badge&logo={})",
        tool,
        badge_label(tool),
        color,
        logo
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_badge() {
        assert_eq!(
            language_badge("Python"),
            "![Python](https://img.shields.io/badge/Python-3776AB?style=for-the-badge&logo=python&logoColor=white)"
        );
        assert_eq!(
            language_badge("JavaScript"),
            "![JavaScript](https://img.shields.io/badge/JavaScript-F7DF1E?style=for-the-badge&logo=javascript&logoColor=black)"
        );
    }

    #[test]
    fn test_unknown_language_uses_defaults() {
        assert_eq!(
            language_badge("Emacs Lisp"),
            "![Emacs Lisp](https://img.shields.io/badge/Emacs%20Lisp-007ec6?style=for-the-badge&logo=emacslisp&logoColor=white)"
        );
    }

    #[test]
    fn test_labels_are_escaped() {
        assert!(language_badge("C++").contains("/badge/C%2B%2B-00599C?"));
        assert!(language_badge("C#").contains("/badge/C%23-239120?"));
        assert!(language_badge("Objective-C").contains("/badge/Objective--C-007ec6?"));
        assert!(tool_badge("VS Code").contains("/badge/VS%20Code-007ACC?"));
    }

    #[test]
    fn test_tool_badge_has_no_logo_color() {
        assert_eq!(
            tool_badge("Docker"),
            "![Docker](https://img.shields.io/badge/Docker-2496ED?style=for-the-badge&logo=docker)"
        );
        assert_eq!(
            tool_badge("Podman"),
            "![Podman](https://img.shields.io/badge/Podman-007ec6?style=for-the-badge&logo=podman)"
        );
    }

    #[test]
    fn test_style_names_are_unique() {
        for (i, (name, _)) in BADGE_STYLES.iter().enumerate() {
            assert!(
                BADGE_STYLES[i + 1..].iter().all(|(other, _)| other != name),
                "duplicate badge style for {}",
                name
            );
        }
    }
}
