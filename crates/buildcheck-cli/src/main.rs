//! buildcheck - run a build and report the one error that matters
//!
//! ## Commands
//!
//! - `run`: execute a command and print its captured output as JSON
//! - `analyze`: extract the most relevant diagnostic from captured output
//! - `verify`: `run` followed by `analyze` on the captured output

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};

use buildcheck_core::{analyze_logs, strip_ansi, AnalysisReport, ProcessResult, RunRequest};
use buildcheck_exec::{BuildRunner, ShellConfig, ShellRunner};

#[derive(Parser)]
#[command(name = "buildcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run build/test commands and extract the most relevant error", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "BUILDCHECK_VERBOSE")]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true, env = "BUILDCHECK_LOG_JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command through the shell and print stdout, stderr and exit code
    Run(CommandArgs),

    /// Extract the most relevant diagnostic from captured output
    Analyze {
        /// Captured stdout text
        #[arg(long, conflicts_with = "stdout_file")]
        stdout: Option<String>,

        /// Read captured stdout from a file
        #[arg(long)]
        stdout_file: Option<PathBuf>,

        /// Captured stderr text
        #[arg(long, conflicts_with = "stderr_file")]
        stderr: Option<String>,

        /// Read captured stderr from a file
        #[arg(long)]
        stderr_file: Option<PathBuf>,
    },

    /// Run a command, then analyze its output
    Verify(CommandArgs),
}

#[derive(Args)]
struct CommandArgs {
    /// Command line passed unmodified to the shell
    command: String,

    /// Working directory for the command
    #[arg(short, long, default_value = ".")]
    cwd: PathBuf,

    /// Shell program used to run the command [default: $BUILDCHECK_SHELL, then sh]
    #[arg(long)]
    shell: Option<PathBuf>,
}

impl CommandArgs {
    fn request(&self) -> Result<RunRequest> {
        RunRequest::new(self.command.clone(), self.cwd.clone()).context("Invalid run request")
    }

    fn runner(&self) -> ShellRunner {
        let shell = match &self.shell {
            Some(program) => ShellConfig::with_program(program),
            None => ShellConfig::from_env(),
        };
        ShellRunner::new(shell)
    }
}

/// Output of `verify`.
#[derive(Debug, Serialize)]
struct Verification {
    run: ProcessResult,
    analysis: AnalysisReport,
}

impl Verification {
    fn passed(&self) -> bool {
        self.run.succeeded() && self.analysis.is_success()
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    buildcheck_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Run(args) => cmd_run(&args).await,
        Commands::Analyze {
            stdout,
            stdout_file,
            stderr,
            stderr_file,
        } => cmd_analyze(
            read_input(stdout, stdout_file.as_deref()).context("Failed to read stdout log")?,
            read_input(stderr, stderr_file.as_deref()).context("Failed to read stderr log")?,
        ),
        Commands::Verify(args) => cmd_verify(&args).await,
    }
}

/// Run a command and print the captured result
async fn cmd_run(args: &CommandArgs) -> Result<ExitCode> {
    let request = args.request()?;
    let result = args.runner().run_build(&request).await;
    print_json(&result)?;
    Ok(ExitCode::SUCCESS)
}

/// Analyze captured output and print the report
fn cmd_analyze(stdout: String, stderr: String) -> Result<ExitCode> {
    let report = analyze_logs(&stdout, &stderr);
    print_json(&report)?;
    Ok(ExitCode::SUCCESS)
}

/// Run a command, analyze its output, and exit non-zero unless both passed
async fn cmd_verify(args: &CommandArgs) -> Result<ExitCode> {
    let request = args.request()?;
    let run = args.runner().run_build(&request).await;
    let analysis = analyze_logs(&strip_ansi(&run.stdout), &strip_ansi(&run.stderr));

    let verification = Verification { run, analysis };
    info!(
        event = "verify.finished",
        exit_code = verification.run.exit_code,
        passed = verification.passed(),
    );
    print_json(&verification)?;

    Ok(if verification.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Inline text wins; otherwise read the file; otherwise empty.
fn read_input(inline: Option<String>, file: Option<&Path>) -> buildcheck_core::Result<String> {
    match (inline, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => Ok(String::new()),
    }
}

fn render_json<T: Serialize>(value: &T) -> buildcheck_core::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = render_json(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}
