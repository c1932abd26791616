//! Profile document rendering
//!
//! [`render_profile`] is a pure function of its inputs: the same aggregate,
//! statistics, username and date always produce the same document.

use chrono::NaiveDate;
use profilegen_core::{Aggregate, UserStats};

use crate::badges::{language_badge, tool_badge};

const TYPING_SVG: &str = "https://readme-typing-svg.herokuapp.com?font=Fira+Code&size=24&duration=4000&pause=1000&color=36BCF7FF&center=true&width=600&background=00000000";

const DIVIDER_GIF: &str = "https://i.imgur.com/KXx0cCx.gif";

/// Everything the template needs besides the aggregate
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub username: &'a str,
    /// Date printed in the footer
    pub date: NaiveDate,
}

/// Animated typing header naming the top project category
pub fn header_animation(top_category: Option<&str>) -> String {
    let lines = match top_category {
        Some(category) => {
            let category = category.replace(' ', "+");
            format!(
                "Welcome+to+my+GitHub+Profile;I'm+a+{}+Developer;Passionate+about+coding;Building+{}+solutions",
                category, category
            )
        }
        None => "Welcome+to+my+GitHub+Profile;I'm+a+Developer;Passionate+about+coding;Creating+innovative+solutions".to_string(),
    };

    format!(
        "<div align=\"center\">\n  <img src=\"{}&lines={}\" alt=\"Typing SVG\" />\n</div>",
        TYPING_SVG, lines
    )
}

/// Render the profile document
pub fn render_profile(aggregate: &Aggregate, stats: &UserStats, context: RenderContext<'_>) -> String {
    let mut content = format!(
        "\n{}\n\n# Hi there 👋, I'm {}\n\nThis is my automatically updated GitHub profile that shows my tech stack based on my repository activity.\n\n",
        header_animation(aggregate.top_category()),
        context.username
    );

    content.push_str(&render_focus_section(aggregate));
    content.push_str(&render_tech_stack(aggregate));
    content.push_str(&render_stats(aggregate, stats, context));

    content
}

/// "What I Work On": categories with counts, then common topics
fn render_focus_section(aggregate: &Aggregate) -> String {
    if aggregate.project_categories.is_empty() {
        return String::new();
    }

    let mut content = String::from("## 🚀 What I Work On\n\n");
    content.push_str("My GitHub repositories focus on these areas:\n\n");

    for (category, count) in &aggregate.project_categories {
        content.push_str(&format!("- **{}** ({} repos)\n", category, count));
    }

    if !aggregate.topics.is_empty() {
        let tags = aggregate
            .topics
            .iter()
            .map(|topic| format!("`#{}`", topic))
            .collect::<Vec<_>>()
            .join(" ");
        content.push_str(&format!("\n**Common topics:** {}\n", tags));
    }

    content
}

fn render_tech_stack(aggregate: &Aggregate) -> String {
    let mut content = format!(
        "\n## 🛠️ My Tech Stack\n\n<div align=\"center\">\n  <img src=\"{}\" width=\"600\" height=\"4\" alt=\"animated tech line\">\n</div>\n",
        DIVIDER_GIF
    );

    if !aggregate.languages.is_empty() {
        let badges = aggregate
            .languages
            .iter()
            .map(|(language, _)| language_badge(language))
            .collect::<Vec<_>>()
            .join(" ");
        content.push_str(&format!("\n### Languages I Use\n\n{}\n", badges));
    }

    if !aggregate.frameworks.is_empty() {
        let badges = join_tool_badges(&aggregate.frameworks);
        content.push_str(&format!("\n### Frameworks & Libraries\n\n{}\n", badges));
    }

    if !aggregate.tools.is_empty() {
        let badges = join_tool_badges(&aggregate.tools);
        content.push_str(&format!("\n### Tools & Technologies\n\n{}\n", badges));
    }

    content
}

fn join_tool_badges(names: &[String]) -> String {
    names
        .iter()
        .map(|name| tool_badge(name))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_stats(aggregate: &Aggregate, stats: &UserStats, context: RenderContext<'_>) -> String {
    let username = context.username;

    format!(
        r#"
## 📊 GitHub Stats

<div align="center">
  <table>
    <tr>
      <td><b>🔭 Repositories</b></td>
      <td><b>⭐ Stars</b></td>
      <td><b>🍴 Forks</b></td>
      <td><b>👥 Followers</b></td>
    </tr>
    <tr>
      <td><img alt="Repositories" src="https://img.shields.io/badge/{repos}-4c71f2?style=for-the-badge&logo=github&logoColor=white"/></td>
      <td><img alt="Stars" src="https://img.shields.io/badge/{stars}-FFD700?style=for-the-badge&logo=github&logoColor=white"/></td>
      <td><img alt="Forks" src="https://img.shields.io/badge/{forks}-4c71f2?style=for-the-badge&logo=github&logoColor=white"/></td>
      <td><img alt="Followers" src="https://img.shields.io/badge/{followers}-FFD700?style=for-the-badge&logo=github&logoColor=white"/></td>
    </tr>
  </table>
</div>

<div align="center">
  <img src="https://github-readme-stats.vercel.app/api?username={username}&show_icons=true&theme=radical" alt="GitHub stats" />
</div>

<div align="center">
  <img src="https://github-readme-stats.vercel.app/api/top-langs/?username={username}&layout=compact&theme=radical" alt="Top Languages" />
</div>

## 📈 Activity

<div align="center">
  <img src="https://github-profile-trophy.vercel.app/?username={username}&theme=radical&row=1&column=6" alt="GitHub trophies" />
</div>

<div align="center">
  <img src="https://github-readme-activity-graph.vercel.app/graph?username={username}&theme=github" alt="GitHub Activity Graph" />
</div>

---

<details>
<summary>⚡ More Stats</summary>
<br>

![Profile Details](https://github-profile-summary-cards.vercel.app/api/cards/profile-details?username={username}&theme=monokai)

![Streak Stats](https://github-readme-streak-stats.herokuapp.com/?user={username}&theme=dark)

</details>

---

<div align="center">
  <img src="{divider}" width="600" height="4" alt="animated footer line">
  <br>
  <img src="https://komarev.com/ghpvc/?username={username}&label=Profile+Views" alt="Profile views">
  <br>
  <i>This profile README is automatically updated using GitHub Actions.<br>Last updated: {date}</i>
</div>
"#,
        repos = aggregate.stats.total_repos,
        stars = aggregate.stats.total_stars,
        forks = aggregate.stats.total_forks,
        followers = stats.followers,
        username = username,
        divider = DIVIDER_GIF,
        date = context.date.format("%Y-%m-%d"),
    )
}
