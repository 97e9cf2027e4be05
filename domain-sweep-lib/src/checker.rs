//! The availability-check capability.
//!
//! Everything that executes lookups (the parallel executor, the benchmark)
//! is generic over [`AvailabilityChecker`]. The RDAP client is the production
//! implementation; tests substitute in-memory doubles, and wrappers such as
//! [`RateLimited`] add policies without touching the executor.

use crate::types::CheckResult;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::future::Future;
use std::num::NonZeroU32;

/// Performs one availability lookup for one fully qualified name.
///
/// Implementations must be fail-closed: anything other than a definitive
/// "no record" answer yields `available == false`. They must not retry on
/// their own; one call is one attempt.
pub trait AvailabilityChecker: Send + Sync {
    /// Check `domain` (e.g. `"abc.io"`) and classify the answer.
    fn check(&self, domain: &str) -> impl Future<Output = CheckResult> + Send;
}

type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Wraps a checker with an optional requests-per-second ceiling.
///
/// The worker bound of a strategy already limits concurrency; this adds a
/// rate bound on top for services that throttle aggressively. Without a
/// limit it forwards calls unchanged.
pub struct RateLimited<C> {
    inner: C,
    limiter: Option<Limiter>,
}

impl<C> RateLimited<C> {
    /// Wrap `inner`, allowing at most `per_second` lookups per second.
    /// `None` (or zero) disables limiting.
    pub fn new(inner: C, per_second: Option<u32>) -> Self {
        let limiter = per_second
            .and_then(NonZeroU32::new)
            .map(|rate| RateLimiter::direct(Quota::per_second(rate)));
        Self { inner, limiter }
    }

    /// Wrap `inner` without any rate limit.
    pub fn unlimited(inner: C) -> Self {
        Self::new(inner, None)
    }

    pub fn is_limited(&self) -> bool {
        self.limiter.is_some()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: AvailabilityChecker> AvailabilityChecker for RateLimited<C> {
    async fn check(&self, domain: &str) -> CheckResult {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
        self.inner.check(domain).await
    }
}

impl<C> std::fmt::Debug for RateLimited<C>
where
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimited")
            .field("inner", &self.inner)
            .field("limited", &self.is_limited())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LookupOutcome;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct CountingChecker {
        calls: AtomicUsize,
    }

    impl AvailabilityChecker for CountingChecker {
        async fn check(&self, domain: &str) -> CheckResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CheckResult::from_outcome(domain, LookupOutcome::Found)
        }
    }

    #[tokio::test]
    async fn test_unlimited_is_passthrough() {
        let checker = RateLimited::unlimited(CountingChecker::default());
        assert!(!checker.is_limited());

        let result = checker.check("abc.io").await;
        assert_eq!(result.domain, "abc.io");
        assert!(!result.available);
        assert_eq!(checker.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_rate_disables_limit() {
        let checker = RateLimited::new(CountingChecker::default(), Some(0));
        assert!(!checker.is_limited());
    }

    #[tokio::test]
    async fn test_limited_spreads_requests() {
        let checker = RateLimited::new(CountingChecker::default(), Some(5));
        assert!(checker.is_limited());

        let start = std::time::Instant::now();
        for i in 0..10 {
            checker.check(&format!("d{}.io", i)).await;
        }
        // Burst of 5, then 5 more at 200ms intervals.
        assert!(start.elapsed() >= Duration::from_millis(800));
        assert_eq!(checker.inner().calls.load(Ordering::SeqCst), 10);
    }
}
