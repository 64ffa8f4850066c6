use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tagcheck_core::report::write_report;
use tagcheck_core::{
    CheckOptions, CheckProgressCallback, DocumentSource, ResultMap, RetryPolicy, execute_check,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Pick the document source; a URL always wins over the local file
pub fn resolve_source(url: Option<&Url>, file: &Path) -> DocumentSource {
    match url {
        Some(url) => DocumentSource::Url(url.clone()),
        None => DocumentSource::File(file.to_path_buf()),
    }
}

/// Turn parsed command line arguments into check options
pub fn build_check_options(args: &ArgMatches) -> Result<CheckOptions> {
    let checks = args
        .get_one::<String>("checks")
        .context("--checks has no value")?;
    let file = args
        .get_one::<String>("file")
        .context("--file has no value")?;
    let url = args.get_one::<Url>("url");
    let retries = *args.get_one::<u32>("retries").unwrap_or(&1);
    let retry_delay = *args.get_one::<u64>("retry-delay").unwrap_or(&5);
    let timeout = *args.get_one::<u64>("timeout").unwrap_or(&30);
    let quiet = args.get_flag("quiet");

    let source = resolve_source(url, &expand_path(file));
    let checks = expand_path(checks);
    debug!("Checking {} against {}", source, checks.display());

    let mut options = CheckOptions::new(source, checks);
    options.retry_policy = RetryPolicy::new(retries, Duration::from_secs(retry_delay));
    options.timeout_secs = timeout;
    options.show_progress_bars = !quiet;

    Ok(options)
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second initialisation (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn progress_printer(quiet: bool) -> Option<CheckProgressCallback> {
    if quiet {
        return None;
    }
    Some(Arc::new(|msg: String| {
        eprintln!("{} {}", "→".blue(), msg.dimmed());
    }))
}

/// Run the check described by `args` and return the result map
pub async fn run_check(args: &ArgMatches) -> Result<ResultMap> {
    let options = build_check_options(args)?;
    let progress_callback = progress_printer(args.get_flag("quiet"));

    let results = execute_check(options, progress_callback).await?;
    Ok(results)
}

pub async fn handle_check(args: &ArgMatches) -> Result<()> {
    let results = run_check(args).await?;

    let stdout = io::stdout();
    write_report(&results, stdout.lock()).context("Failed to write report to stdout")?;
    Ok(())
}
