use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scoreboard_sync::config::{load_config, validate_config};
use scoreboard_sync::output::{format_job_failure, format_job_success, format_run_summary, should_use_colors};
use scoreboard_sync::sponsors::ConfiguredSponsors;
use scoreboard_sync::update::{run_all, run_job, Job, UpdateContext};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Update the classic leaderboard in README.md
    Classic,
    /// Update the package leaderboard in README.md
    Packages,
    /// Generate contributor badges
    Badges,
    /// Run every job in sequence (default if no subcommand)
    All,
}

#[derive(Parser, Debug)]
#[command(name = "scoreboard-sync")]
#[command(about = "Aggregate challenge scoreboards into README leaderboards and badges", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Repository root (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    root: Option<PathBuf>,

    /// Path to config file (defaults to <root>/scoreboard.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Skip the sponsors page lookup
    #[arg(long, global = true)]
    no_sponsors: bool,

    /// Bypass the sponsors cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::All);

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = cli.root.unwrap_or_else(|| PathBuf::from("."));

    let mut config = match load_config(cli.config, &root) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_FAILURE);
    }

    if cli.no_sponsors {
        config.sponsors.enabled = false;
    }

    let sponsors = ConfiguredSponsors::from_config(&config.sponsors, !cli.no_cache);
    let ctx = UpdateContext::new(root, config);
    let use_colors = should_use_colors();

    let job = match command {
        Commands::Classic => Job::Classic,
        Commands::Packages => Job::Packages,
        Commands::Badges => Job::Badges,
        Commands::All => {
            let summary = run_all(&ctx, &sponsors).await;
            println!("{}", format_run_summary(&summary, use_colors));
            let code = if summary.all_succeeded() { EXIT_SUCCESS } else { EXIT_FAILURE };
            std::process::exit(code);
        }
    };

    match run_job(&ctx, job, &sponsors).await {
        Ok(summary) => {
            println!("{}", format_job_success(&summary, use_colors));
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            eprintln!("{}", format_job_failure(job, &e, use_colors));
            std::process::exit(EXIT_FAILURE);
        }
    }
}
