//! Single-flight coordination for token refresh
//!
//! At most one refresh call may be in flight per client. Every request that
//! hits a 401 while a refresh is running parks on a queue instead of issuing
//! a second call, and resumes with the shared outcome once the leader
//! finishes. Waiters are drained in park order.
//!
//! The coordinator owns nothing but the gate and the queue; the actual HTTP
//! call (and its persistence side effects) is injected by the caller, which
//! keeps this logic testable without a backend.

use crate::error::{ApiError, ApiResult};
use crate::store::TokenPair;
use std::future::Future;
use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

/// Shared result of one refresh cycle
#[derive(Debug, Clone)]
enum RefreshOutcome {
    /// The backend issued a new pair; it is already persisted
    Refreshed(TokenPair),
    /// The refresh failed terminally; tokens are already cleared
    Failed(String),
}

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// Gate and pending queue for token refresh
#[derive(Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    /// Create a new coordinator with a closed gate and an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` unless a refresh is already in flight
    ///
    /// The first caller becomes the leader: it sets the gate, runs `op`, and
    /// publishes the outcome to every caller that parked in the meantime.
    /// `op` must persist the new pair on success and clear the store on
    /// failure *before* returning, so waiters never observe stale tokens.
    pub async fn run<F, Fut>(&self, op: F) -> ApiResult<TokenPair>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<TokenPair>>,
    {
        let waiter = {
            let mut state = self
                .state
                .lock()
                .map_err(|_| ApiError::storage("Refresh gate lock poisoned"))?;
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("Refresh already in flight, parking request");
            return match rx.await {
                Ok(RefreshOutcome::Refreshed(pair)) => Ok(pair),
                Ok(RefreshOutcome::Failed(reason)) => Err(ApiError::SessionExpired(reason)),
                Err(_) => Err(ApiError::SessionExpired(
                    "Refresh was abandoned before completing".to_string(),
                )),
            };
        }

        let result = op().await;

        let outcome = match &result {
            Ok(pair) => RefreshOutcome::Refreshed(pair.clone()),
            Err(e) => RefreshOutcome::Failed(e.to_string()),
        };

        let waiters = {
            let mut state = self
                .state
                .lock()
                .map_err(|_| ApiError::storage("Refresh gate lock poisoned"))?;
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };

        debug!(waiters = waiters.len(), "Refresh finished, resuming queue");
        // FIFO: waiters resume in the order they parked
        for tx in waiters {
            let _ = tx.send(outcome.clone());
        }

        result
    }

    /// Whether a refresh is currently in flight
    pub fn is_in_flight(&self) -> bool {
        self.state.lock().map(|s| s.in_flight).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;
    use tokio::time::{sleep, Duration};

    fn pair(n: usize) -> TokenPair {
        TokenPair::new(format!("access-{n}"), format!("refresh-{n}"))
    }

    /// Concurrent callers share exactly one refresh call.
    #[tokio::test]
    async fn single_flight_makes_one_call() {
        let coordinator = Arc::new(RefreshCoordinator::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());

        let mut tasks = Vec::new();
        for _ in 0..3 {
            let coordinator = Arc::clone(&coordinator);
            let calls = Arc::clone(&calls);
            let release = Arc::clone(&release);
            tasks.push(tokio::spawn(async move {
                coordinator
                    .run(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        release.notified().await;
                        Ok(pair(1))
                    })
                    .await
            }));
        }

        // Let all three tasks reach the gate before the leader finishes
        sleep(Duration::from_millis(50)).await;
        assert!(coordinator.is_in_flight());
        release.notify_waiters();

        for task in tasks {
            let result = task.await.unwrap().unwrap();
            assert_eq!(result.access_token, "access-1");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!coordinator.is_in_flight());
    }

    /// A failed refresh rejects the leader and every queued waiter.
    #[tokio::test]
    async fn failure_rejects_all_queued() {
        let coordinator = Arc::new(RefreshCoordinator::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());

        let mut tasks = Vec::new();
        for _ in 0..3 {
            let coordinator = Arc::clone(&coordinator);
            let calls = Arc::clone(&calls);
            let release = Arc::clone(&release);
            tasks.push(tokio::spawn(async move {
                coordinator
                    .run(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        release.notified().await;
                        Err(ApiError::SessionExpired("refresh token rejected".into()))
                    })
                    .await
            }));
        }

        sleep(Duration::from_millis(50)).await;
        release.notify_waiters();

        for task in tasks {
            let err = task.await.unwrap().unwrap_err();
            assert!(err.is_terminal_auth(), "unexpected error: {err}");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Once a cycle completes, the gate reopens and a later caller refreshes
    /// again (the gate is per-cycle, not per-process-lifetime).
    #[tokio::test]
    async fn gate_reopens_after_each_cycle() {
        let coordinator = RefreshCoordinator::new();
        let calls = AtomicUsize::new(0);

        for n in 1..=2 {
            let result = coordinator
                .run(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(pair(n))
                })
                .await
                .unwrap();
            assert_eq!(result.access_token, format!("access-{n}"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    /// Waiters that park during a successful cycle all observe the new pair,
    /// never the stale one.
    #[tokio::test]
    async fn waiters_observe_only_the_new_pair() {
        let coordinator = Arc::new(RefreshCoordinator::new());
        let release = Arc::new(Notify::new());

        // Leader holds the gate open
        let leader = {
            let coordinator = Arc::clone(&coordinator);
            let release = Arc::clone(&release);
            tokio::spawn(async move {
                coordinator
                    .run(|| async move {
                        release.notified().await;
                        Ok(pair(2))
                    })
                    .await
            })
        };

        sleep(Duration::from_millis(20)).await;

        let mut waiters = Vec::new();
        for _ in 0..5 {
            let coordinator = Arc::clone(&coordinator);
            waiters.push(tokio::spawn(async move {
                coordinator
                    .run(|| async move {
                        assert!(false, "a parked request must never start its own refresh");
                        Ok(pair(99))
                    })
                    .await
            }));
        }

        sleep(Duration::from_millis(20)).await;
        release.notify_waiters();

        leader.await.unwrap().unwrap();
        for waiter in waiters {
            let result = waiter.await.unwrap().unwrap();
            assert_eq!(result.access_token, "access-2");
        }
    }
}
