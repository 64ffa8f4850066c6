use crate::checks::load_checks;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tagcheck_scanner::error::Result;
use tagcheck_scanner::fetcher::{ensure_file_exists, read_local};
use tagcheck_scanner::{
    DocumentSource, Fetcher, ParsedDocument, ResultMap, RetryPolicy, evaluate,
};
use tracing::info;
use url::Url;

/// Options for configuring a check run
pub struct CheckOptions {
    pub source: DocumentSource,
    pub checks: PathBuf,
    pub retry_policy: RetryPolicy,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl CheckOptions {
    pub fn new(source: DocumentSource, checks: impl Into<PathBuf>) -> Self {
        Self {
            source,
            checks: checks.into(),
            retry_policy: RetryPolicy::default(),
            timeout_secs: 30,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting check progress
pub type CheckProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Check already-loaded HTML against the selector list at `checks`
pub fn check_html(html: &str, checks: &Path) -> Result<ResultMap> {
    let selectors = load_checks(checks)?;
    let document = ParsedDocument::parse(html);
    evaluate(&document, &selectors)
}

/// Check a local HTML file against the selector list at `checks`
pub fn check_html_file(file: &Path, checks: &Path) -> Result<ResultMap> {
    let selectors = load_checks(checks)?;
    let html = read_local(file)?;
    let document = ParsedDocument::parse(&html);
    evaluate(&document, &selectors)
}

/// Fetch `url` and check it against the selector list at `checks`
pub async fn check_url(url: &Url, checks: &Path, fetcher: &Fetcher) -> Result<ResultMap> {
    let selectors = load_checks(checks)?;
    let html = fetcher.fetch(url.as_str()).await?;
    let document = ParsedDocument::parse(&html);
    evaluate(&document, &selectors)
}

/// Execute a full check run with the given options.
///
/// Both inputs are validated before anything is read or fetched, and nothing
/// is returned unless the whole pipeline succeeds.
pub async fn execute_check(
    options: CheckOptions,
    progress_callback: Option<CheckProgressCallback>,
) -> Result<ResultMap> {
    let CheckOptions {
        source,
        checks,
        retry_policy,
        timeout_secs,
        show_progress_bars,
    } = options;

    ensure_file_exists(&checks)?;
    source.ensure_available()?;

    let selectors = load_checks(&checks)?;
    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Loaded {} selector(s) from {}",
            selectors.len(),
            checks.display()
        ));
    }

    // Spinner only makes sense while waiting on the network
    let progress_bar = if show_progress_bars && matches!(source, DocumentSource::Url(_)) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {}", source));
        Some(Arc::new(pb))
    } else {
        None
    };

    let pb_clone = progress_bar.clone();
    let callback_clone = progress_callback.clone();
    let fetcher = Fetcher::with_timeout(timeout_secs)?
        .with_retry_policy(retry_policy)
        .with_retry_callback(Arc::new(move |retry: u32, delay: Duration, error: String| {
            let msg = format!(
                "Fetch failed ({}), retry {}/{} in {}s",
                error,
                retry,
                retry_policy.max_retries,
                delay.as_secs_f32()
            );
            if let Some(ref pb) = pb_clone {
                pb.set_message(msg.clone());
            }
            if let Some(ref callback) = callback_clone {
                callback(msg);
            }
        }));

    let loaded = source.load(&fetcher).await;
    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }
    let html = loaded?;

    let document = ParsedDocument::parse(&html);
    let results = evaluate(&document, &selectors)?;

    info!(
        "{} of {} selector(s) present in {}",
        results.present_count(),
        results.len(),
        source
    );

    Ok(results)
}
