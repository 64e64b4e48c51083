mod cli;
mod core;

use anyhow::Context;
use clap::Parser;

use crate::core::config::{AppConfig, MAX_DAYS, MIN_DAYS};

#[derive(Parser)]
#[command(
    name = "costwatch",
    about = "Daily AWS spend per linked account, with day-over-day trends",
    version
)]
struct Cli {
    /// Number of trailing days to report (1-365, default 8)
    #[arg(
        short,
        long,
        value_name = "DAYS",
        value_parser = clap::value_parser!(u32).range(MIN_DAYS as i64..=MAX_DAYS as i64)
    )]
    days: Option<u32>,

    /// Neither read nor write the account name cache
    #[arg(long)]
    no_cache: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version print to stdout and succeed
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    crate::core::logging::init(cli.verbose);

    let config = AppConfig::load().context("Failed to load configuration")?;
    let issues = config.validate();
    if !issues.is_empty() {
        anyhow::bail!(
            "Invalid config {}:\n  {}",
            AppConfig::config_path().display(),
            issues.join("\n  ")
        );
    }

    let use_color = cli::output::detect_color(!cli.no_color, config.settings.color);
    colored::control::set_override(use_color);

    let opts = cli::report_cmd::ReportOptions {
        days: cli.days.unwrap_or(config.settings.days),
        use_cache: !cli.no_cache && config.settings.cache,
        cache_dir: config
            .settings
            .cache_dir
            .clone()
            .unwrap_or_else(crate::core::cost::cache::default_cache_dir),
        palette: cli::output::Palette {
            enabled: use_color,
        },
    };
    tracing::debug!(?opts, "resolved options");

    cli::report_cmd::run(&opts, &config).await
}
