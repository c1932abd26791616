//! Profilegen CLI - Command-line interface for profilegen
//!
//! Fetches a user's repositories, aggregates their statistics and writes a profile README

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use profilegen_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success, performance,
    Aggregate, ErrorContext, LogFormat, LoggingConfig, ProfileConfig, ProfileError, ProfileResult,
    UserStats,
};
use profilegen_readme::{render_profile, ReadmeWriter, RenderContext};
use profilegen_repo::DataSource;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "profilegen")]
#[command(about = "Generate a GitHub profile README from repository statistics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze repositories and write the profile README (default)
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Date printed in the footer (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print the repository aggregate and user statistics as JSON
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Validate effective configuration
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Args, Default)]
struct SourceArgs {
    /// Account to analyze (overrides config and environment)
    #[arg(short, long)]
    username: Option<String>,

    /// Access token (overrides GITHUB_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// Use sample data even when a token is available
    #[arg(long)]
    sample: bool,
}

/// JSON document printed by `analyze`
#[derive(Serialize)]
struct AnalysisReport<'a> {
    username: &'a str,
    live: bool,
    aggregate: &'a Aggregate,
    user_stats: &'a UserStats,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ProfileResult<()> {
    let cli = Cli::parse();

    let mut logging_config = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    logging_config.format = cli.log_format;

    init_logging(&logging_config).map_err(|e| ProfileError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check RUST_LOG directives"),
    })?;

    info!("Starting profilegen v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(cli.config.as_ref())?;
    config.apply_env();

    match cli.command.unwrap_or(Commands::Generate {
        source: SourceArgs::default(),
        output: None,
        date: None,
    }) {
        Commands::Generate {
            source,
            output,
            date,
        } => {
            if let Some(output) = output {
                config.output_path = output;
            }
            handle_generate(config, source, date).await?;
        }
        Commands::Analyze { source } => {
            handle_analyze(config, source).await?;
        }
        Commands::Config {
            show,
            init,
            validate,
        } => {
            handle_config(&config, cli.config.as_ref(), show, init, validate)?;
        }
    }

    Ok(())
}

fn load_config(config_path: Option<&PathBuf>) -> ProfileResult<ProfileConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return ProfileConfig::from_file(path);
    }

    for path in ProfileConfig::default_paths() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return ProfileConfig::from_file(&path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(ProfileConfig::default())
}

/// Apply command-line overrides and pick the data source
fn resolve_source(config: &mut ProfileConfig, args: SourceArgs) -> DataSource {
    if let Some(username) = args.username {
        config.username = username;
    }
    if let Some(token) = args.token {
        config.access_token = Some(token);
    }

    if args.sample {
        info!("Sample mode requested on the command line");
        DataSource::Sample
    } else {
        DataSource::from_config(config)
    }
}

async fn handle_generate(
    mut config: ProfileConfig,
    args: SourceArgs,
    date: Option<NaiveDate>,
) -> ProfileResult<()> {
    let source = resolve_source(&mut config, args);
    config.validate()?;

    log_operation_start!("generate_profile", username = %config.username, live = source.is_live());

    let aggregate =
        performance::measure_async("analyze_repositories", source.analyze_repositories(&config))
            .await;
    let stats = performance::measure_async("user_stats", source.user_stats(&config.username)).await;

    let context = RenderContext {
        username: &config.username,
        date: date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let document = render_profile(&aggregate, &stats, context);

    ReadmeWriter::new()
        .write(&document, &config.output_path)
        .await
        .map_err(|e| {
            log_operation_error!("write_profile", e, path = %config.output_path.display());
            e
        })?;

    log_operation_success!("generate_profile",
        username = %config.username,
        path = %config.output_path.display(),
        languages = aggregate.languages.len(),
        repos = aggregate.stats.total_repos
    );

    println!(
        "{} updated successfully for {}",
        config.output_path.display(),
        config.username
    );
    Ok(())
}

async fn handle_analyze(mut config: ProfileConfig, args: SourceArgs) -> ProfileResult<()> {
    let source = resolve_source(&mut config, args);
    config.validate()?;

    let aggregate = source.analyze_repositories(&config).await;
    let user_stats = source.user_stats(&config.username).await;

    let report = AnalysisReport {
        username: &config.username,
        live: source.is_live(),
        aggregate: &aggregate,
        user_stats: &user_stats,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn handle_config(
    config: &ProfileConfig,
    config_path: Option<&PathBuf>,
    show: bool,
    init: bool,
    validate: bool,
) -> ProfileResult<()> {
    if init {
        let path = match config_path {
            Some(path) => path.clone(),
            None => ProfileConfig::default_paths()
                .into_iter()
                .next()
                .unwrap_or_else(|| PathBuf::from("profilegen.toml")),
        };

        if path.exists() {
            println!("Configuration already exists at {}", path.display());
        } else {
            ProfileConfig::default().save_to_file(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    if validate {
        match config.validate() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => {
                e.log();
                return Err(e);
            }
        }
    }

    if show || (!init && !validate) {
        let rendered = toml::to_string_pretty(config).map_err(|e| ProfileError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cli").with_operation("show_config"),
        })?;
        println!("{}", rendered);
        println!(
            "# access token: {}",
            if config.has_credential() {
                "configured"
            } else {
                "not set (sample mode)"
            }
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["profilegen"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_generate_arguments() {
        let cli = Cli::try_parse_from([
            "profilegen",
            "generate",
            "--username",
            "octocat",
            "--sample",
            "--date",
            "2024-02-29",
            "-o",
            "out/README.md",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Generate {
                source,
                output,
                date,
            }) => {
                assert_eq!(source.username.as_deref(), Some("octocat"));
                assert!(source.sample);
                assert_eq!(output, Some(PathBuf::from("out/README.md")));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29));
            }
            _ => panic!("Expected generate command"),
        }
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        assert!(Cli::try_parse_from(["profilegen", "generate", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn test_resolve_source_overrides() {
        let mut config = ProfileConfig::default();
        let source = resolve_source(
            &mut config,
            SourceArgs {
                username: Some("someone".to_string()),
                token: Some("token".to_string()),
                sample: true,
            },
        );

        assert!(!source.is_live());
        assert_eq!(config.username, "someone");
        assert!(config.has_credential());

        let source = resolve_source(&mut ProfileConfig::default(), SourceArgs::default());
        assert!(!source.is_live());
    }
}
