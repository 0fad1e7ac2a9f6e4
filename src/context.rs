//! Execution context for store calls: a cancellation token and an optional deadline.

use crate::error::StoreError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// Never cancelled unless [`Context::cancel`] is called; no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Starts the call built by `call` and drives it unless the context is cancelled or its
    /// deadline passes first. A context that is already done never starts the call.
    pub async fn run<C, F, T>(&self, call: C) -> Result<T, StoreError>
    where
        C: FnOnce() -> F,
        F: Future<Output = Result<T, StoreError>>,
    {
        if self.token.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Err(StoreError::DeadlineExceeded);
        }

        let deadline = async {
            match self.deadline {
                Some(d) => tokio::time::sleep_until(d).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(StoreError::Cancelled),
            _ = deadline => Err(StoreError::DeadlineExceeded),
            out = call() => out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_runs_to_completion() {
        let ctx = Context::background();
        let out = ctx.run(|| async { Ok::<_, StoreError>(7) }).await.unwrap();
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn cancelled_context_fails_fast() {
        let ctx = Context::background();
        ctx.cancel();
        let out = ctx.run(|| async { Ok::<_, StoreError>(()) }).await;
        assert!(matches!(out, Err(StoreError::Cancelled)));
    }

    #[tokio::test]
    async fn clones_share_cancellation() {
        let ctx = Context::background();
        let handle = ctx.clone();
        handle.cancel();
        let out = ctx.run(|| async { Ok::<_, StoreError>(()) }).await;
        assert!(matches!(out, Err(StoreError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_interrupts_slow_call() {
        let ctx = Context::with_timeout(Duration::from_millis(50));
        let out = ctx
            .run(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, StoreError>(())
            })
            .await;
        assert!(matches!(out, Err(StoreError::DeadlineExceeded)));
    }

    #[tokio::test(start_paused = true)]
    async fn past_deadline_never_starts_the_call() {
        let ctx = Context::with_timeout(Duration::from_millis(10));
        tokio::time::advance(Duration::from_millis(20)).await;
        let out = ctx
            .run(|| -> std::future::Ready<Result<(), StoreError>> {
                panic!("call started after the deadline")
            })
            .await;
        assert!(matches!(out, Err(StoreError::DeadlineExceeded)));
    }
}
