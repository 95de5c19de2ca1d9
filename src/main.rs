//! Letter Trie - command line entrypoint.
//!
//! Loads configuration, initializes logging, and runs the requested command.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use letter_trie_lib::config::{self, ConfigLoader, ConfigResult, LetterTrieConfig, LogConfig};
use letter_trie_lib::demo;
use letter_trie_lib::error::{
    report_error, set_error_reporter, ErrorContext, LetterTrieError, LetterTrieResult,
    TracingErrorReporter,
};

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(name = "letter_trie", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the reference insert/lookup/remove scenario
    Demo {
        /// Output format for the scenario report
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to
/// standard error so reports on standard output stay clean.
fn init_logging(log: &LogConfig) -> LetterTrieResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    let result = if log.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_file(log.source_location)
                    .with_line_number(log.source_location),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(log.source_location)
                    .with_line_number(log.source_location),
            )
            .try_init()
    };

    result.map_err(|e| LetterTrieError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn run(command: Command, loaded: ConfigResult<LetterTrieConfig>) -> LetterTrieResult<()> {
    match command {
        Command::Demo { format } => {
            let config = loaded?;
            info!(tree = ?config.tree, "Running reference scenario");
            let report = demo::run_reference_scenario(config.tree.to_tree_config())?;

            match format {
                OutputFormat::Text => println!("{report}"),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
            Ok(())
        }
        Command::Validate => {
            info!("Validating configuration");
            loaded?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let toml = LetterTrieConfig::default().to_toml()?;

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

fn main() {
    let args = Args::parse();

    let loaded = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX).load();
    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();

    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    set_error_reporter(Arc::new(TracingErrorReporter));

    let command = args.command.unwrap_or(Command::Demo {
        format: OutputFormat::Text,
    });
    if let Err(e) = run(command, loaded) {
        report_error(ErrorContext::new(e, "letter_trie").with_span_trace());
        process::exit(1);
    }
}
