use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crpt_core::{AppError, AppResult};
use crpt_domain::RateLimitPolicy;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

use super::clock::{Clock, TokioClock};

const MAX_PREALLOCATED_ENTRIES: usize = 1024;

// Retry horizon for admissions whose expiry cannot be represented as an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Grant to perform exactly one rate-limited request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Instant the admission was recorded in the log.
    pub admitted_at: Instant,
    /// Time the caller spent waiting for capacity.
    pub waited: Duration,
}

enum Decision {
    Admitted(Instant),
    Full { retry_at: Instant, in_window: usize },
}

/// Per-instance sliding-window rate gate.
///
/// At most `policy.limit()` admissions are recorded in any trailing
/// `policy.window()`. An admission is expired once it is a full window old.
pub struct RateGate {
    policy: RateLimitPolicy,
    limit: usize,
    clock: Arc<dyn Clock>,
    admission_log: Mutex<VecDeque<Instant>>,
}

impl RateGate {
    /// Creates a gate driven by the tokio clock.
    #[must_use]
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_clock(policy, Arc::new(TokioClock))
    }

    /// Creates a gate driven by the given clock.
    #[must_use]
    pub fn with_clock(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        let limit = usize::try_from(policy.limit()).unwrap_or(usize::MAX);
        Self {
            policy,
            limit,
            clock,
            admission_log: Mutex::new(VecDeque::with_capacity(
                limit.min(MAX_PREALLOCATED_ENTRIES),
            )),
        }
    }

    /// Returns the policy the gate enforces.
    #[must_use]
    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Waits until an admission fits in the window, then records it.
    ///
    /// Never fails. Dropping the returned future while it waits records
    /// nothing.
    pub async fn acquire(&self) -> Admission {
        let requested_at = self.clock.now();

        loop {
            match self.evaluate().await {
                Decision::Admitted(admitted_at) => {
                    let waited = admitted_at.saturating_duration_since(requested_at);
                    trace!(
                        waited_ms = whole_millis(waited),
                        limit = self.limit,
                        "rate gate admitted request"
                    );
                    return Admission {
                        admitted_at,
                        waited,
                    };
                }
                Decision::Full {
                    retry_at,
                    in_window,
                } => {
                    let wait = retry_at.saturating_duration_since(self.clock.now());
                    debug!(
                        in_window,
                        limit = self.limit,
                        wait_ms = whole_millis(wait),
                        "rate gate full, waiting for capacity"
                    );
                    self.clock.sleep_until(retry_at).await;
                }
            }
        }
    }

    /// Records an admission only if one fits right now.
    ///
    /// Returns `Err(AppError::RateLimited)` instead of waiting; nothing is
    /// recorded in that case.
    pub async fn try_acquire(&self) -> AppResult<Admission> {
        match self.evaluate().await {
            Decision::Admitted(admitted_at) => Ok(Admission {
                admitted_at,
                waited: Duration::ZERO,
            }),
            Decision::Full {
                retry_at,
                in_window,
            } => {
                let retry_in = retry_at.saturating_duration_since(self.clock.now());
                Err(AppError::RateLimited(format!(
                    "{in_window} of {} admissions used in the last {:?}, next slot in {retry_in:?}",
                    self.limit,
                    self.policy.window()
                )))
            }
        }
    }

    /// Drops expired admissions and returns how many remain in the window.
    pub async fn evict_expired(&self) -> usize {
        let mut admission_log = self.admission_log.lock().await;
        evict(&mut admission_log, self.clock.now(), self.policy.window());
        admission_log.len()
    }

    /// Returns the number of admissions inside the current window.
    pub async fn admissions_in_window(&self) -> usize {
        self.evict_expired().await
    }

    async fn evaluate(&self) -> Decision {
        let mut admission_log = self.admission_log.lock().await;
        let now = self.clock.now();
        let window = self.policy.window();
        evict(&mut admission_log, now, window);

        if admission_log.len() < self.limit {
            admission_log.push_back(now);
            return Decision::Admitted(now);
        }

        let retry_at = admission_log
            .front()
            .and_then(|oldest| oldest.checked_add(window))
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        Decision::Full {
            retry_at,
            in_window: admission_log.len(),
        }
    }
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// Entries are appended in time order, so expired ones are always at the front.
fn evict(admission_log: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while admission_log
        .front()
        .is_some_and(|admitted_at| now.saturating_duration_since(*admitted_at) >= window)
    {
        admission_log.pop_front();
    }
}
