use crate::analyzer::{self, Severity, SuppressionRule};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meshlint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze Kubernetes resource snapshots for service mesh configuration problems")]
#[command(long_about = "Loads Pods and Namespaces from YAML files, directories or stdin and runs mesh analyzers over the snapshot, such as detecting sidecar proxies whose version differs from the running sidecar injector.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (defaults to .meshlint.yaml in the working directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze resource files and report mesh configuration problems
    Analyze {
        /// Files or directories to load, or `-` for stdin
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        output: OutputFormat,

        /// Minimum severity to report
        #[arg(long, value_enum)]
        output_threshold: Option<SeverityThreshold>,

        /// Minimum severity that fails the run
        #[arg(long, value_enum)]
        failure_threshold: Option<SeverityThreshold>,

        /// Suppress messages, as CODE=RESOURCE (e.g. "IST0105=Pod details-*.default")
        #[arg(short, long, value_name = "RULE")]
        suppress: Vec<SuppressionRule>,

        /// Only run the named analyzer (repeatable)
        #[arg(short, long, value_name = "NAME")]
        analyzer: Vec<String>,

        /// Always exit with code 0 when analysis completes
        #[arg(long)]
        no_fail: bool,

        /// When to colorize plain output
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorChoice,
    },

    /// List the available analyzers
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
    Yaml,
    Github,
}

impl From<OutputFormat> for analyzer::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Plain => Self::Plain,
            OutputFormat::Json => Self::Json,
            OutputFormat::Yaml => Self::Yaml,
            OutputFormat::Github => Self::GitHub,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityThreshold {
    Info,
    Warning,
    Error,
}

impl From<SeverityThreshold> for Severity {
    fn from(threshold: SeverityThreshold) -> Self {
        match threshold {
            SeverityThreshold::Info => Severity::Info,
            SeverityThreshold::Warning => Severity::Warning,
            SeverityThreshold::Error => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
