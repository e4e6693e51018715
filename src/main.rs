//! connectivity-planner: quality scoring and expansion planning from speed tests
//!
//! Scores geo-tagged measurements, ranks rural areas by improvement priority,
//! clusters expansion zones and forecasts quality trends.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use connectivity_planner::{
    cli::{self, ZoneMode},
    config::{self, AppConfig, ConfigPreset},
    pipeline::{exit_codes, OutputFormat},
    Measurement, OptionContext,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "connectivity-planner")]
#[command(version)]
#[command(about = "Connectivity quality scoring and expansion planning", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error occurred

EXAMPLES:
    # Score a single speed test
    connectivity-planner score --download 85 --upload 9 --latency 45 --jitter 8

    # Full expansion report as a terminal summary
    connectivity-planner analyze records.json -o summary

    # Performance-profile zones with five clusters
    connectivity-planner zones records.json --mode profile --zones 5

    # Two-week forecast
    connectivity-planner forecast records.json --horizon 14")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Named preset (default, latam, conservative); config file values override it
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `score` subcommand
#[derive(Parser)]
struct ScoreArgs {
    /// Download speed in Mbps
    #[arg(long)]
    download: f64,

    /// Upload speed in Mbps
    #[arg(long)]
    upload: f64,

    /// Latency in milliseconds
    #[arg(long)]
    latency: f64,

    /// Jitter in milliseconds
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    /// Packet loss in percent
    #[arg(long, default_value_t = 0.0)]
    packet_loss: f64,

    /// Dish obstruction in percent
    #[arg(long, default_value_t = 0.0)]
    obstruction: f64,

    /// Precomputed stability score; skips estimation
    #[arg(long)]
    stability: Option<f64>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `analyze` subcommand
#[derive(Parser)]
struct AnalyzeArgs {
    /// JSON array of connectivity records
    records: PathBuf,

    /// Number of expansion zones
    #[arg(long)]
    zones: Option<usize>,

    /// Clustering seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `zones` subcommand
#[derive(Parser)]
struct ZonesArgs {
    /// JSON array of connectivity records
    records: PathBuf,

    /// Number of zones
    #[arg(long)]
    zones: Option<usize>,

    /// Clustering seed
    #[arg(long)]
    seed: Option<u64>,

    /// Feature space to cluster in
    #[arg(long, value_enum, default_value = "expansion")]
    mode: ZoneMode,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `forecast` subcommand
#[derive(Parser)]
struct ForecastArgs {
    /// JSON array of connectivity records
    records: PathBuf,

    /// Number of periods to project
    #[arg(long)]
    horizon: Option<usize>,

    /// Skip cluster-based refinement
    #[arg(long)]
    no_refine: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments shared by the record-only subcommands
#[derive(Parser)]
struct RecordsArgs {
    /// JSON array of connectivity records
    records: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single measurement
    Score(ScoreArgs),

    /// Build the full expansion report (priorities, zones, ROI)
    Analyze(AnalyzeArgs),

    /// Cluster records into expansion or performance-profile zones
    Zones(ZonesArgs),

    /// Forecast future quality scores
    Forecast(ForecastArgs),

    /// Daily quality evolution and insights
    Trends(RecordsArgs),

    /// Summary statistics and provider comparison
    Providers(RecordsArgs),

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .connectivity-planner.yaml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the JSON Schema for the config file
    Schema {
        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print an example config file
    Example,
}

/// Resolve the base configuration.
///
/// A named preset is the starting point when given; values from a discovered
/// config file that differ from the defaults are layered on top.
fn base_config(preset: Option<&str>, config_path: Option<&Path>) -> Result<AppConfig> {
    let mut base = match preset {
        Some(name) => {
            let preset = ConfigPreset::from_name(name).with_context_none(|| {
                let valid: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                format!("unknown preset '{name}'. Valid options: {}", valid.join(", "))
            })?;
            tracing::debug!("Using preset: {}", preset.description());
            AppConfig::from_preset(preset)
        }
        None => AppConfig::default(),
    };

    let (file_config, loaded_from) = config::load_or_default(config_path);
    if let Some(path) = loaded_from {
        tracing::info!("Loaded config from {}", path.display());
        base.merge(&file_config);
    }
    Ok(base)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let exit_code = match cli.command {
        Commands::Score(args) => {
            let mut measurement = Measurement::new(args.download, args.upload, args.latency)
                .with_jitter(args.jitter)
                .with_packet_loss(args.packet_loss)
                .with_obstruction(args.obstruction);
            if let Some(stability) = args.stability {
                measurement = measurement.with_stability(stability);
            }
            let config = base_config(cli.preset.as_deref(), cli.config.as_deref())?;
            cli::run_score(config, measurement, args.output_file, cli.quiet)?
        }

        Commands::Analyze(args) => {
            let mut config = base_config(cli.preset.as_deref(), cli.config.as_deref())?;
            apply_clustering_overrides(&mut config, args.zones, args.seed);
            cli::run_analyze(
                config,
                args.records,
                args.output,
                args.output_file,
                cli.no_color,
                cli.quiet,
            )?
        }

        Commands::Zones(args) => {
            let mut config = base_config(cli.preset.as_deref(), cli.config.as_deref())?;
            apply_clustering_overrides(&mut config, args.zones, args.seed);
            cli::run_zones(config, args.records, args.mode, args.output_file, cli.quiet)?
        }

        Commands::Forecast(args) => {
            let mut config = base_config(cli.preset.as_deref(), cli.config.as_deref())?;
            if let Some(horizon) = args.horizon {
                config.forecast.horizon = horizon;
            }
            if args.no_refine {
                config.forecast.refine_with_clusters = false;
            }
            cli::run_forecast(config, args.records, args.output_file, cli.quiet)?
        }

        Commands::Trends(args) => {
            let config = base_config(cli.preset.as_deref(), cli.config.as_deref())?;
            cli::run_trends(config, args.records, args.output_file, cli.quiet)?
        }

        Commands::Providers(args) => {
            let config = base_config(cli.preset.as_deref(), cli.config.as_deref())?;
            cli::run_providers(config, args.records, args.output_file, cli.quiet)?
        }

        Commands::Config { action } => {
            run_config_action(action, cli.preset.as_deref(), cli.config.as_deref())?;
            exit_codes::SUCCESS
        }
    };

    if exit_code != exit_codes::SUCCESS {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Explicit flags always win, even when they equal the defaults.
fn apply_clustering_overrides(config: &mut AppConfig, zones: Option<usize>, seed: Option<u64>) {
    if let Some(zones) = zones {
        config.clustering.zones = zones;
    }
    if let Some(seed) = seed {
        config.clustering.seed = seed;
    }
}

fn run_config_action(
    action: ConfigAction,
    preset: Option<&str>,
    config_path: Option<&Path>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if preset.is_none() && config::discover_config_file(config_path).is_none() {
                eprintln!("# No config file found; showing defaults");
            }
            let config = base_config(preset, config_path)?;
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("connectivity-planner").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(config_path) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init { force } => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".connectivity-planner.yaml");
            if target.exists() && !force {
                anyhow::bail!(
                    "{} already exists. Pass --force to overwrite it.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
        ConfigAction::Schema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
        }
        ConfigAction::Example => {
            print!("{}", config::generate_example_config());
        }
    }
    Ok(())
}
