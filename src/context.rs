//! Caller-supplied cancellation and deadlines for API calls.
//!
//! The client never times out on its own. A [`RequestContext`] attached with
//! [`LunchMoneyClient::with_context`](crate::rest::LunchMoneyClient::with_context)
//! is the only bound on how long a call may take.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use lunchmoney_api_client::context::RequestContext;
//! use lunchmoney_api_client::rest::LunchMoneyClient;
//!
//! # async fn run() -> lunchmoney_api_client::Result<()> {
//! let (ctx, cancel) = RequestContext::background()
//!     .with_timeout(Duration::from_secs(5))
//!     .with_cancel();
//! let client = LunchMoneyClient::new("api_key").with_context(ctx);
//!
//! tokio::spawn(async move {
//!     tokio::time::sleep(Duration::from_secs(1)).await;
//!     cancel.cancel();
//! });
//!
//! let user = client.get_user().await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::LunchMoneyError;

/// Why a request was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// [`CancelHandle::cancel`] was called.
    Cancelled,
    /// The context deadline passed.
    DeadlineExceeded,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::Cancelled => write!(f, "context cancelled"),
            CancelReason::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

/// Cancellation signal and optional deadline for API calls.
///
/// Cloning is cheap; clones observe the same cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancelled: Option<watch::Receiver<bool>>,
}

/// Cancels every call running under the context it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel the associated context.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Bound calls by an absolute deadline. The earliest deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Bound calls by a duration from now.
    ///
    /// A timeout too large to represent as an instant adds no deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Make the context cancellable, returning the handle that cancels it.
    ///
    /// Replaces any cancellation signal the context already had.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        self.cancelled = Some(receiver);
        (self, CancelHandle { sender })
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check whether the context is already done.
    pub fn is_done(&self) -> bool {
        self.done_reason().is_some()
    }

    fn done_reason(&self) -> Option<CancelReason> {
        if self.cancelled.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(CancelReason::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(CancelReason::DeadlineExceeded);
        }
        None
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> CancelReason {
        let cancelled = async {
            match self.cancelled.clone() {
                // A dropped handle can never cancel.
                Some(mut rx) => {
                    let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
                    if closed {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => CancelReason::Cancelled,
            _ = deadline => CancelReason::DeadlineExceeded,
        }
    }

    /// Run `future` unless the context finishes first.
    ///
    /// A context that is already done fails without polling `future`.
    pub async fn run<T, F>(&self, future: F) -> Result<T, LunchMoneyError>
    where
        F: Future<Output = Result<T, LunchMoneyError>>,
    {
        if let Some(reason) = self.done_reason() {
            return Err(LunchMoneyError::Cancelled(reason));
        }

        tokio::select! {
            biased;
            reason = self.done() => Err(LunchMoneyError::Cancelled(reason)),
            result = future => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_runs_to_completion() {
        let ctx = RequestContext::background();
        let value = ctx.run(async { Ok::<_, LunchMoneyError>(7) }).await.unwrap();
        assert_eq!(value, 7);
        assert!(!ctx.is_done());
    }

    #[tokio::test]
    async fn test_already_cancelled_skips_future() {
        let (ctx, cancel) = RequestContext::background().with_cancel();
        cancel.cancel();

        let polled = std::sync::atomic::AtomicBool::new(false);
        let err = ctx
            .run(async {
                polled.store(true, std::sync::atomic::Ordering::SeqCst);
                Ok::<_, LunchMoneyError>(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, LunchMoneyError::Cancelled(CancelReason::Cancelled)));
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_deadline_aborts_pending_future() {
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(50));
        let err = ctx
            .run(std::future::pending::<Result<(), LunchMoneyError>>())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LunchMoneyError::Cancelled(CancelReason::DeadlineExceeded)
        ));
    }

    #[tokio::test]
    async fn test_cancel_during_future() {
        let (ctx, cancel) = RequestContext::background().with_cancel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        });

        let err = ctx
            .run(std::future::pending::<Result<(), LunchMoneyError>>())
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_earliest_deadline_wins() {
        let now = Instant::now();
        let ctx = RequestContext::background()
            .with_deadline(now + Duration::from_secs(10))
            .with_deadline(now + Duration::from_secs(1))
            .with_deadline(now + Duration::from_secs(5));
        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_unrepresentable_timeout_sets_no_deadline() {
        let ctx = RequestContext::background().with_timeout(Duration::MAX);
        assert_eq!(ctx.deadline(), None);
        assert!(!ctx.is_done());

        let deadline = Instant::now() + Duration::from_secs(1);
        let ctx = RequestContext::background()
            .with_deadline(deadline)
            .with_timeout(Duration::MAX);
        assert_eq!(ctx.deadline(), Some(deadline));
    }
}
