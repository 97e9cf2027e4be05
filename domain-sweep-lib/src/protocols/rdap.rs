//! RDAP (Registration Data Access Protocol) availability checks.
//!
//! Each lookup is a single `GET {base}/domain/{name}`. The status code is the
//! whole answer: 404 means the registry has no record and the name is
//! available, 200 means it is registered. Everything else, including
//! throttling, timeouts and transport errors, is reported as registered.
//! Lookups are never retried.

use crate::checker::AvailabilityChecker;
use crate::error::DomainSweepError;
use crate::types::{CheckResult, LookupOutcome, ScanConfig, DEFAULT_RDAP_BASE_URL, DEFAULT_TIMEOUT};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, trace};

/// RDAP client used as the production [`AvailabilityChecker`].
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct RdapChecker {
    /// HTTP client for making RDAP requests
    http_client: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Timeout for a single request
    timeout: Duration,
}

impl RdapChecker {
    /// Create a checker against the public RDAP redirector with the default
    /// 2 second timeout.
    pub fn new() -> Result<Self, DomainSweepError> {
        Self::with_config(DEFAULT_RDAP_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a checker for a specific RDAP service and timeout.
    pub fn with_config<U: Into<String>>(
        base_url: U,
        timeout: Duration,
    ) -> Result<Self, DomainSweepError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_max_idle_per_host(100)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .user_agent(concat!("domain-sweep/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
            timeout,
        })
    }

    /// Create a checker from a validated scan configuration.
    pub fn from_config(config: &ScanConfig) -> Result<Self, DomainSweepError> {
        Self::with_config(config.rdap_base_url.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Lookup URL for `domain`.
    pub fn lookup_url(&self, domain: &str) -> String {
        format!("{}/domain/{}", self.base_url, domain)
    }

    /// Issue one RDAP request and classify the answer.
    pub async fn lookup(&self, domain: &str) -> LookupOutcome {
        let url = self.lookup_url(domain);
        trace!("RDAP request to {}", url);

        let request = self.http_client.get(&url).send();
        let outcome = match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => classify_status(response.status()),
            Ok(Err(e)) => classify_error(&e),
            Err(_) => LookupOutcome::Timeout,
        };

        if !outcome.is_definitive() {
            debug!("RDAP lookup for {} was not definitive: {}", domain, outcome);
        }
        outcome
    }
}

impl AvailabilityChecker for RdapChecker {
    async fn check(&self, domain: &str) -> CheckResult {
        CheckResult::from_outcome(domain, self.lookup(domain).await)
    }
}

/// Map an RDAP status code to a lookup outcome.
///
/// Only 404 and 200 are definitive. 429 and server errors are not retried.
pub fn classify_status(status: StatusCode) -> LookupOutcome {
    match status {
        StatusCode::NOT_FOUND => LookupOutcome::NotFound,
        StatusCode::OK => LookupOutcome::Found,
        other => LookupOutcome::UnexpectedStatus(other.as_u16()),
    }
}

/// Map a transport error to a lookup outcome.
pub fn classify_error(error: &reqwest::Error) -> LookupOutcome {
    if error.is_timeout() {
        LookupOutcome::Timeout
    } else {
        LookupOutcome::Network(error.to_string())
    }
}
