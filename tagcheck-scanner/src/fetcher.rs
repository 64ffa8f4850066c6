use crate::error::{CheckError, Result};
use reqwest::Client;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Called before each retry with the upcoming attempt number, the delay and the failure
pub type RetryCallback = Arc<dyn Fn(u32, Duration, String) + Send + Sync>;

/// Bounded retry with exponential backoff for URL fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub backoff_factor: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            backoff_factor: 2,
        }
    }

    /// A policy that gives up after the first failure
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1);
        self.initial_delay
            .saturating_mul(self.backoff_factor.saturating_pow(exponent))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1, Duration::from_secs(5))
    }
}

pub struct Fetcher {
    client: Client,
    retry_policy: RetryPolicy,
    retry_callback: Option<RetryCallback>,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(30)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tagcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            retry_policy: RetryPolicy::default(),
            retry_callback: None,
        })
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_retry_callback(mut self, callback: RetryCallback) -> Self {
        self.retry_callback = Some(callback);
        self
    }

    /// GET `url` and return its body, retrying failures per the retry policy.
    /// The last failure is returned once every attempt has been used.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let parsed_url = Url::parse(url)
            .map_err(|e| CheckError::InvalidUrl(format!("{}: {}", url, e)))?;

        let mut retry = 0;
        loop {
            match self.fetch_once(parsed_url.as_str()).await {
                Ok(body) => return Ok(body),
                Err(e) if retry < self.retry_policy.max_retries => {
                    retry += 1;
                    let delay = self.retry_policy.delay_for(retry);
                    warn!(
                        "Fetch of {} failed: {}. Retrying in {:?} ({}/{})",
                        parsed_url, e, delay, retry, self.retry_policy.max_retries
                    );
                    if let Some(ref callback) = self.retry_callback {
                        callback(retry, delay, e.to_string());
                    }
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(
                        "Fetch of {} failed after {} attempt(s): {}",
                        parsed_url,
                        retry + 1,
                        e
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CheckError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        info!(
            "Fetched {} ({} bytes, {:?})",
            url,
            body.len(),
            start.elapsed()
        );

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Where the HTML to check comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(Url),
}

impl DocumentSource {
    /// Fail with `MissingFile` when a local source does not exist.
    /// Remote sources are never checked up front.
    pub fn ensure_available(&self) -> Result<()> {
        match self {
            DocumentSource::File(path) => ensure_file_exists(path),
            DocumentSource::Url(_) => Ok(()),
        }
    }

    pub async fn load(&self, fetcher: &Fetcher) -> Result<String> {
        match self {
            DocumentSource::File(path) => read_local(path),
            DocumentSource::Url(url) => fetcher.fetch(url.as_str()).await,
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => write!(f, "{}", url),
        }
    }
}

pub fn ensure_file_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CheckError::MissingFile(path.to_path_buf()))
    }
}

/// Read a local HTML file, replacing invalid UTF-8 sequences
pub fn read_local(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CheckError::MissingFile(path.to_path_buf()),
        _ => CheckError::IoError(e),
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
