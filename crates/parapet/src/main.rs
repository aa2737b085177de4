//! Parapet: API-contract conformance checker.
//!
//! Checks that an OpenAPI description, its examples and a live server
//! agree with each other.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use parapet_http::{HttpExecutor, HttpExecutorConfig};
use parapet_lib::{
    render_json, render_text, run_live, run_validate, select_operations, OperationReport,
    OutputFormat, RunSummary,
};
use parapet_spec_parser::{parse_spec_file, ApiSpec};
use parapet_telemetry::{log_run_completed, log_run_started, log_spec_loaded, LogFormat, TelemetryConfig};

#[derive(Parser, Debug)]
#[command(name = "parapet", about = "API-contract conformance checker", version)]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, env = "PARAPET_LOG", default_value = "info")]
    log_level: String,

    /// Log format (pretty or json). Logs are written to stderr.
    #[arg(long, global = true, env = "PARAPET_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check parameter declarations and examples without contacting a server.
    Validate {
        /// API description (YAML or JSON).
        #[arg(short, long)]
        spec: PathBuf,

        /// Only check these operation ids (repeatable).
        #[arg(short, long = "operation")]
        operations: Vec<String>,

        /// Output format (text or json).
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check examples, then send them to a live server and check the responses.
    Test {
        /// API description (YAML or JSON).
        #[arg(short, long)]
        spec: PathBuf,

        /// Base URL of the server under test.
        #[arg(long, env = "PARAPET_SERVER")]
        server: String,

        /// Only check these operation ids (repeatable).
        #[arg(short, long = "operation")]
        operations: Vec<String>,

        /// Extra request header, as "Name: value" (repeatable).
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Operations checked at the same time.
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Request timeout in seconds.
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Output format (text or json).
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Load the description, reporting failures on stderr.
fn load(spec_path: &Path) -> Result<ApiSpec, ExitCode> {
    if !spec_path.exists() {
        eprintln!("error: spec file not found: {}", spec_path.display());
        return Err(ExitCode::from(1));
    }
    match parse_spec_file(spec_path) {
        Ok(spec) => {
            log_spec_loaded!(
                file = %spec_path.display(),
                title = %spec.title,
                operations = spec.operations.len()
            );
            Ok(spec)
        }
        Err(e) => {
            eprintln!("error: {}: {}", spec_path.display(), e);
            Err(ExitCode::from(1))
        }
    }
}

fn parse_format(format: &str) -> Result<OutputFormat, ExitCode> {
    OutputFormat::parse(format).ok_or_else(|| {
        eprintln!("error: unknown output format '{}' (expected text or json)", format);
        ExitCode::from(1)
    })
}

fn parse_header(raw: &str) -> Result<(String, String), ExitCode> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => {
            eprintln!("error: invalid header '{}' (expected \"Name: value\")", raw);
            Err(ExitCode::from(1))
        }
    }
}

/// Print the reports and map the outcome to an exit code.
fn finish(spec: &ApiSpec, reports: &[OperationReport], format: OutputFormat) -> ExitCode {
    let title = format!("{} {}", spec.title, spec.api_version);
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&render_json(&title, reports)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize report: {}", e);
                return ExitCode::from(1);
            }
        },
        OutputFormat::Text => print!("{}", render_text(&title, reports)),
    }

    let summary = RunSummary::from_reports(reports);
    log_run_completed!(
        operations = summary.operations,
        passed = summary.passed,
        failed = summary.failed,
        errored = summary.errored
    );

    if summary.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Run the validate command.
fn run_validate_command(spec_path: &Path, operations: &[String], format: &str) -> ExitCode {
    let format = match parse_format(format) {
        Ok(format) => format,
        Err(code) => return code,
    };
    let spec = match load(spec_path) {
        Ok(spec) => spec,
        Err(code) => return code,
    };
    let selected = match select_operations(&spec, operations) {
        Ok(selected) => selected,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let reports = run_validate(&selected);
    finish(&spec, &reports, format)
}

struct TestArgs {
    spec: PathBuf,
    server: String,
    operations: Vec<String>,
    headers: Vec<String>,
    concurrency: usize,
    timeout: u64,
    format: String,
}

/// Run the test command.
async fn run_test_command(args: TestArgs) -> ExitCode {
    let format = match parse_format(&args.format) {
        Ok(format) => format,
        Err(code) => return code,
    };

    let mut config =
        HttpExecutorConfig::new().with_request_timeout(Duration::from_secs(args.timeout.max(1)));
    for raw in &args.headers {
        match parse_header(raw) {
            Ok((name, value)) => config = config.with_header(name, value),
            Err(code) => return code,
        }
    }

    let executor = match HttpExecutor::new(&args.server, config) {
        Ok(executor) => executor,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let spec = match load(&args.spec) {
        Ok(spec) => spec,
        Err(code) => return code,
    };
    let selected = match select_operations(&spec, &args.operations) {
        Ok(selected) => selected,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let reports = run_live(&executor, &selected, args.concurrency).await;
    finish(&spec, &reports, format)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(log_format) = LogFormat::parse(&cli.log_format) else {
        eprintln!(
            "error: unknown log format '{}' (expected pretty or json)",
            cli.log_format
        );
        return ExitCode::from(1);
    };
    let telemetry = TelemetryConfig::new()
        .with_log_level(cli.log_level.as_str())
        .with_log_format(log_format);
    if let Err(e) = parapet_telemetry::init(&telemetry) {
        eprintln!("error: {}", e);
        return ExitCode::from(1);
    }

    match cli.command {
        Commands::Validate {
            spec,
            operations,
            format,
        } => {
            log_run_started!(command = "validate", spec = %spec.display());
            run_validate_command(&spec, &operations, &format)
        }
        Commands::Test {
            spec,
            server,
            operations,
            headers,
            concurrency,
            timeout,
            format,
        } => {
            log_run_started!(command = "test", spec = %spec.display(), server = %server);
            run_test_command(TestArgs {
                spec,
                server,
                operations,
                headers,
                concurrency,
                timeout,
                format,
            })
            .await
        }
    }
}
