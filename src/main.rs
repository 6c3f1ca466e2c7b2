// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finsight::config::{generate_default_config, LoggingConfig};
use finsight::{export, Config, Dataset, ExportFormat, SummaryReport};

#[derive(Parser)]
#[command(name = "finsight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal finance dashboard for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ~/.config/finsight/config.toml, then ./finsight.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal dashboard (default)
    Tui,

    /// Export transactions or the report without opening the UI
    Export {
        format: ExportKind,

        /// Output directory (default: export.output_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print cash flow, budget banding and the expense forecast
    Summary {
        #[arg(long)]
        json: bool,
    },

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportKind {
    Csv,
    Pdf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default().context("Failed to load default config")?,
    };

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            init_logging(&config.logging, true)?;
            let dataset = load_dataset(&config)?;
            run_ui_mode(&config, dataset)?;
        }
        Commands::Export { format, out } => {
            init_logging(&config.logging, false)?;
            let dataset = load_dataset(&config)?;
            let dir = out.unwrap_or_else(|| config.export.output_dir.clone());
            run_export(&config, &dataset, format, &dir)?;
        }
        Commands::Summary { json } => {
            init_logging(&config.logging, false)?;
            let dataset = load_dataset(&config)?;
            let report = SummaryReport::build(&dataset);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render(config.preferences().currency));
            }
        }
        Commands::InitConfig { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✓ Wrote default config to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Terminal UI logs go to a file so they never draw over the screen
fn init_logging(config: &LoggingConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("finsight={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.file_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        let writer = Mutex::new(file);

        if config.is_json() {
            registry.with(fmt::layer().json().with_writer(writer)).init();
        } else {
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
        }
    } else if config.is_json() {
        registry.with(fmt::layer().json().with_writer(io::stderr)).init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }

    tracing::info!("FinSight v{}", finsight::VERSION);
    Ok(())
}

fn load_dataset(config: &Config) -> Result<Dataset> {
    match &config.data.transactions_csv {
        Some(path) => Dataset::with_transactions_csv(path),
        None => Ok(Dataset::sample()),
    }
}

fn run_export(config: &Config, dataset: &Dataset, format: ExportKind, dir: &Path) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    let (format, path) = match format {
        ExportKind::Csv => (
            ExportFormat::Csv,
            export::write_csv(dir, &dataset.transactions, today)?,
        ),
        ExportKind::Pdf => (
            ExportFormat::Pdf,
            export::write_pdf(dir, today, config.preferences().date_format)?,
        ),
    };

    println!("✓ Exported {} to {}", format.label(), path.display());
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config, dataset: Dataset) -> Result<()> {
    println!("🖥️  Loading FinSight...\n");
    println!("✓ Loaded {} transactions", dataset.transactions.len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = finsight::App::new(
        dataset,
        config.preferences(),
        config.export.output_dir.clone(),
    );
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config, _dataset: Dataset) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: finsight summary | finsight export csv");
    std::process::exit(1);
}
