//! roster-reports - batch status reports from a class roster
//!
//! Reads a CSV roster and, for every person, runs the report generator,
//! compiles the report to PDF and optionally mails it.
//!
//! Exit codes:
//!   0 - The roster was processed (individual entries may have failed)
//!   1 - Fatal error (unreadable roster, summary files, invalid config)
//!   2 - Entry failures with --fail-on-entry-error

mod cli;
mod config;
mod error;
mod models;
mod report;
mod roster;
mod runner;
mod summary;
mod tools;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use roster::{Roster, RosterLine};
use runner::{BatchRunner, RunnerOptions};
use std::path::Path;
use tools::{CommandCompiler, CommandGenerator, CommandMailer};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("roster-reports v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_batch(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .roster-reports.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to point at your report generator, compiler and mail agent.");
    Ok(())
}

/// Initialize logging. `RUST_LOG` wins over the verbosity flags.
fn init_logging(args: &Args) {
    let level = args.log_level().to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the whole batch. Returns the exit code (0 or 2).
async fn run_batch(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let roster_path = args.roster_path();

    if args.dry_run {
        return handle_dry_run(&roster_path, &config);
    }

    let generator = CommandGenerator::new(config.generator.clone());
    let compiler = CommandCompiler::new(config.compiler.clone());
    let mailer = CommandMailer::new(config.mail.tool(), config.general.outputs_dir.clone());

    let options = RunnerOptions::from_config(&config, !args.quiet);
    let mut runner = BatchRunner::new(options, &generator, &compiler);
    if config.mail.enabled {
        info!("Mail delivery enabled via {}", config.mail.program);
        runner = runner.with_mailer(&mailer);
    }

    info!(
        "Processing roster {} into {}",
        roster_path.display(),
        config.general.outputs_dir.display()
    );
    let record = runner.run(&roster_path).await?;

    if config.general.run_record {
        match report::write_run_record(&record, &config.general.outputs_dir) {
            Ok(path) => info!("Run record written to {}", path.display()),
            Err(e) => warn!("{:#}", e),
        }
    }

    if !args.quiet {
        print!("{}", report::generate_console_summary(&record));
    }

    if args.fail_on_entry_error && record.summary.has_entry_failures() {
        eprintln!(
            "\n⛔ {} entries failed and {} produced no report. Failing (exit code 2).",
            record.summary.failed, record.summary.skipped
        );
        return Ok(2);
    }

    Ok(0)
}

/// Handle --dry-run: parse the roster, print what would happen, exit.
fn handle_dry_run(roster_path: &Path, config: &Config) -> Result<i32> {
    let roster = Roster::load(roster_path)?;
    let outputs = &config.general.outputs_dir;
    let ext = config.report_extension();

    println!("\n🔍 Dry run: {} (no tool is invoked)\n", roster_path.display());

    if roster.is_empty() {
        println!("   The roster has no data lines.");
    }

    for line in roster.lines() {
        match line {
            RosterLine::Entry(entry) => {
                println!(
                    "   👤 line {:>4}  {:<20} {} <{}>",
                    entry.line, entry.username, entry.display_name, entry.email
                );
                println!(
                    "                  → {} → {}",
                    outputs.join(format!("{}.{}", entry.username, ext)).display(),
                    outputs.join(format!("{}.pdf", entry.username)).display()
                );
            }
            RosterLine::Malformed { line, raw, error } => {
                println!("   ⚠️  line {:>4}  skipped: {} ({:?})", line, error, raw);
            }
        }
    }

    for username in roster.duplicate_usernames() {
        println!("   ⚠️  {} appears more than once", username);
    }

    println!("\n   Entries: {}", roster.entries().count());
    println!(
        "   Summary files re-headered: {}{}",
        outputs.join(summary::SCORE_SUMMARY_FILE).display(),
        if config.general.state_summary {
            format!(", {}", outputs.join(summary::STATE_SUMMARY_FILE).display())
        } else {
            String::new()
        }
    );
    if config.general.run_record {
        println!(
            "   Run record: {}",
            outputs.join(report::RUN_RECORD_FILE).display()
        );
    }
    println!(
        "   Mail delivery: {}",
        if config.mail.enabled { "enabled" } else { "disabled" }
    );
    if !outputs.is_dir() {
        println!(
            "   ⚠️  {} does not exist; a real run would abort",
            outputs.display()
        );
    }

    println!("\n✅ Dry run complete. No files were written.");
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
