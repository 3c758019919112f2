use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kubeposture::config::Config;
use kubeposture::error::PostureError;
use kubeposture::output::OutputFormat;
use kubeposture::signal::catalog;
use kubeposture::AssessOptions;

#[derive(Parser)]
#[command(
    name = "kubeposture",
    about = "Risk signal aggregation and posture scoring for Kubernetes clusters",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a cluster snapshot and print its posture report
    Assess {
        /// Path to the cluster snapshot (JSON)
        snapshot: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Fail when the posture score is at or above this value (0-100)
        #[arg(long)]
        fail_above: Option<u8>,

        /// Extra free-text findings, one per line
        #[arg(long)]
        findings: Option<PathBuf>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List every signal category and its weight
    ListSignals {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .kubeposture.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            snapshot,
            config,
            format,
            fail_above,
            findings,
            output,
        } => cmd_assess(snapshot, config, format, fail_above, findings, output),
        Commands::ListSignals { format } => cmd_list_signals(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_assess(
    snapshot: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    fail_above: Option<u8>,
    findings_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
) -> Result<i32, PostureError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        tracing::warn!(format = %format_str, "unknown format, using console");
        OutputFormat::Console
    });

    let extra_findings = match findings_path {
        Some(path) => kubeposture::load_findings(&path)?,
        None => Vec::new(),
    };

    let options = AssessOptions {
        config_path: config,
        fail_above_override: fail_above,
        extra_findings,
    };

    let report = kubeposture::assess(&snapshot, &options)?;
    let rendered = kubeposture::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = score at or above threshold
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn cmd_list_signals(format_str: String) -> Result<i32, PostureError> {
    let categories = catalog::all_categories();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&categories)?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{:<28} {:<10} {:<7} {:<9} DESCRIPTION",
                "NAME", "SEVERITY", "WEIGHT", "ORIGIN"
            );
            println!("{}", "-".repeat(96));
            for category in &categories {
                println!(
                    "{:<28} {:<10} {:<7} {:<9} {}",
                    category.name,
                    category.severity.to_string(),
                    category.weight,
                    category.origin.to_string(),
                    category.description,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, PostureError> {
    let path = PathBuf::from(".kubeposture.toml");

    if path.exists() && !force {
        eprintln!(".kubeposture.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .kubeposture.toml");

    Ok(0)
}
