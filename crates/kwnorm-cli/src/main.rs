mod display;

use clap::{Parser, Subcommand};
use colored::Colorize;
use kwnorm_core::{BatchConfig, Error, DEFAULT_KEYWORD_COLUMN};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// kwnorm — keyword near-duplicate finder
///
/// Normalize keyword lists to canonical keys and label near-duplicate rows
/// for manual review.
#[derive(Parser)]
#[command(name = "kwnorm", version, about, long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a workbook or CSV file with canonical keys and duplicate groups
    Annotate {
        /// Path to .xlsx/.xls/.ods/.csv file
        source: PathBuf,
        /// Worksheet name (first sheet when omitted)
        #[arg(short, long)]
        sheet: Option<String>,
        /// Name of the keyword column
        #[arg(short, long, default_value = DEFAULT_KEYWORD_COLUMN)]
        column: String,
        /// Output file (default: <source>_normalized.xlsx or .csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only report, do not write the annotated file
        #[arg(long)]
        no_write: bool,
        /// Normalize rows in parallel
        #[arg(long)]
        parallel: bool,
        /// Number of annotated rows to preview
        #[arg(long, default_value_t = 5)]
        preview: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical key of each keyword
    Normalize {
        /// Raw keywords
        #[arg(required = true)]
        keywords: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Annotate {
            source,
            sheet,
            column,
            output,
            no_write,
            parallel,
            preview,
            json,
        } => {
            let config = BatchConfig {
                source,
                sheet,
                column,
                output,
                parallel,
                write_output: !no_write,
            };
            cmd_annotate(&config, preview, json)
        }
        Commands::Normalize { keywords, json } => cmd_normalize(&keywords, json),
        Commands::Version => {
            println!(
                "kwnorm {} (kwnorm-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "kwnorm_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Exit code for a failed run: 1 when the user named a sheet or column that
/// does not exist, 2 when the source itself is the problem.
fn exit_code_for(err: &Error) -> i32 {
    if err.is_schema_error() {
        1
    } else {
        2
    }
}

// ── Commands ──────────────────────────────────────────────

fn cmd_annotate(config: &BatchConfig, preview: usize, json: bool) -> i32 {
    if !json {
        display::print_loading(config);
    }

    match kwnorm_core::run(config) {
        Ok(outcome) => {
            if json {
                let output = serde_json::json!({
                    "source": config.source,
                    "sheet": outcome.sheet,
                    "column": config.column,
                    "output": outcome.output_path,
                    "report": outcome.report,
                });
                match serde_json::to_string_pretty(&output) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("{} {}", "error:".red().bold(), e);
                        return 2;
                    }
                }
            } else {
                display::print_outcome(config, &outcome, preview);
            }
            0
        }
        Err(err) => {
            if json {
                let output = serde_json::json!({
                    "error": err.to_string(),
                    "available": err.available(),
                });
                eprintln!("{}", output);
            } else {
                display::print_error(&err);
            }
            exit_code_for(&err)
        }
    }
}

fn cmd_normalize(keywords: &[String], json: bool) -> i32 {
    let keys: Vec<(String, String)> = keywords
        .iter()
        .map(|k| (k.clone(), kwnorm_core::normalize_keyword(k)))
        .collect();

    if json {
        let entries: Vec<serde_json::Value> = keys
            .iter()
            .map(|(keyword, key)| serde_json::json!({ "keyword": keyword, "normalized": key }))
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                return 2;
            }
        }
    } else {
        for (keyword, key) in &keys {
            println!("{} {} {}", keyword, "→".dimmed(), key.green());
        }
    }
    0
}
