//! requp - update pinned packages in a requirements file
//!
//! Every `name==version` line is moved to the latest release on the package
//! index. Ranges, comments, options and unparsable lines are left as-is.

use clap::Parser;
use requp::cli::CliArgs;
use requp::orchestrator::Orchestrator;
use requp::output::{create_formatter, write_warnings, OutputConfig};
use requp::registry::{HttpClient, PyPIAdapter, RegistryAdapter};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    args.validate()?;

    // Print version info in verbose mode
    if args.verbose {
        eprintln!("requp v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.file.display());
        eprintln!("Index: {}", args.index_url);
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let client = HttpClient::with_timeout(args.timeout)?.with_max_retries(args.retries);
    let adapter: Arc<dyn RegistryAdapter> =
        Arc::new(PyPIAdapter::with_base_url(client, &args.index_url));
    let orchestrator = Orchestrator::new(args.orchestrator_config(), adapter)?;

    let started = Instant::now();
    let result = orchestrator.process_file(&args.file, args.dry_run).await?;

    if args.verbose {
        eprintln!(
            "Checked {} lines in {:.2}s",
            result.results.len(),
            started.elapsed().as_secs_f64()
        );
    }

    // Create output formatter based on CLI options
    let mut output_config = OutputConfig::from_cli(args.json, args.diff, args.verbose, args.quiet);
    output_config.color = io::stdout().is_terminal();
    let formatter = create_formatter(&output_config);

    // Warnings go to stderr unless the format carries them
    if !formatter.includes_warnings() {
        let mut stderr = io::stderr().lock();
        write_warnings(&result, io::stderr().is_terminal(), &mut stderr)?;
    }

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
