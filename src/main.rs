use anyhow::Context;
use clap::Parser;
use meshlint::{
    cli::{Cli, Commands},
    handlers::{self, AnalyzeOptions},
};
use std::process;

/// Exit code when diagnostics reach the failure threshold.
const EXIT_FINDINGS: i32 = 2;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    match cli.command {
        Commands::Analyze {
            paths,
            output,
            output_threshold,
            failure_threshold,
            suppress,
            analyzer,
            no_fail,
            color,
        } => {
            let options = AnalyzeOptions {
                paths,
                output,
                output_threshold: output_threshold.map(Into::into),
                failure_threshold: failure_threshold.map(Into::into),
                suppress,
                analyzers: analyzer,
                no_fail,
                color,
            };
            let passed = handlers::handle_analyze(cli.config.as_deref(), options)
                .context("analysis failed")?;
            Ok(if passed { 0 } else { EXIT_FINDINGS })
        }
        Commands::List => {
            handlers::handle_list()?;
            Ok(0)
        }
    }
}
