// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weliive - live-visit chat engine with hot-lead detection.
//!
//! This is the binary entry point: it loads the configuration, sets up
//! logging, and dispatches to the `demo`, `score`, and `config` commands.

mod demo;
mod score;

use clap::{Parser, Subcommand};
use weliive_config::WeliiveConfig;
use weliive_core::WeliiveError;

/// Weliive - live-visit chat engine with hot-lead detection.
#[derive(Parser, Debug)]
#[command(name = "weliive", version, about, long_about = None)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulated live visit in the terminal.
    Demo {
        /// How long the visit lasts.
        #[arg(long, default_value_t = 12)]
        seconds: u64,
        /// Visitor message to send once the scripted conversation has begun.
        #[arg(long = "say", value_name = "TEXT")]
        say: Vec<String>,
        /// Question to submit to the Q&A panel.
        #[arg(long = "ask", value_name = "TEXT")]
        ask: Vec<String>,
        /// Behave like an embedding host that never opens the live view.
        #[arg(long)]
        embedded: bool,
    },
    /// Score a text for purchase intent.
    Score {
        /// Text to score.
        text: String,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match weliive_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            weliive_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Demo {
            seconds,
            say,
            ask,
            embedded,
        }) => {
            let options = demo::DemoOptions {
                seconds,
                say,
                ask,
                embedded,
            };
            demo::run_demo(config, options, cli.plain).await
        }
        Some(Commands::Score { text }) => score::run_score(&config, &text, cli.plain),
        Some(Commands::Config) => run_config(&config),
        None => {
            println!("weliive: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        use colored::Colorize;
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// `weliive config`: print the merged configuration as TOML.
fn run_config(config: &WeliiveConfig) -> Result<(), WeliiveError> {
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &WeliiveConfig) -> Result<String, WeliiveError> {
    toml::to_string_pretty(config)
        .map_err(|e| WeliiveError::Internal(format!("failed to serialize config: {e}")))
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over `app.log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weliive={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
