//! GRL rule editor
//!
//! - `grledit` / `grledit tui`: interactive three-panel editor
//! - `grledit submit`: one-shot headless evaluation of rule and context files
//! - `grledit config`: resolved paths and settings

use anyhow::Result;
use clap::{Parser, Subcommand};
use grledit_logging::{init_logging, LogConfig};
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "grledit", version, about = "Author and evaluate GRL rule sets")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive editor (default)
    Tui {
        #[command(flatten)]
        args: cli::tui::TuiArgs,
    },

    /// Submit a rule file once and print the rendered result
    Submit(cli::submit::SubmitArgs),

    /// Show configuration paths and effective settings
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

async fn run_command(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Tui { args } => cli::tui::run(args).await.map(|()| ExitCode::SUCCESS),
        Commands::Submit(args) => cli::submit::run(args).await,
        Commands::Config { json } => {
            cli::config::run(cli::config::ConfigArgs { json }).map(|()| ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui {
        args: cli::tui::TuiArgs::default(),
    });

    // The TUI owns the terminal, so stderr only carries warnings there.
    let tui_mode = matches!(command, Commands::Tui { .. });
    if let Err(err) = init_logging(LogConfig {
        app_name: "grledit",
        verbose: cli.verbose,
        tui_mode,
        log_dir: None,
    }) {
        eprintln!("Warning: {:#}", err);
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("ERROR: failed to start async runtime: {}", err);
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(run_command(command)) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}
