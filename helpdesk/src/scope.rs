//! Cancellable request scopes tied to a view's lifetime.
//!
//! A view creates one [`RequestScope`], runs every request through
//! [`RequestScope::run`], and calls [`RequestScope::cancel`] when it unmounts.
//! Cancelled requests resolve to [`ApiError::Cancelled`] and their results are
//! dropped, so no late response can write into a dead view.

#[cfg(test)]
#[path = "scope_test.rs"]
mod scope_test;

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortHandle, Abortable};

use crate::error::ApiError;

#[derive(Debug, Default)]
struct ScopeInner {
    cancelled: AtomicBool,
    next_id: AtomicU64,
    in_flight: Mutex<Vec<(u64, AbortHandle)>>,
}

/// Shared handle; clones refer to the same scope.
#[derive(Clone, Debug, Default)]
pub struct RequestScope {
    inner: Arc<ScopeInner>,
}

impl RequestScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Number of requests currently running inside the scope.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Abort every in-flight request and refuse new ones.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        let handles = std::mem::take(
            &mut *self
                .inner
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for (_, handle) in handles {
            handle.abort();
        }
    }

    /// Run `request` inside the scope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] if the scope is cancelled before or
    /// while the request runs; otherwise the request's own result.
    pub async fn run<T, F>(&self, request: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (handle, registration) = AbortHandle::new_pair();
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, handle));

        let outcome = Abortable::new(request, registration).await;

        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(entry, _)| *entry != id);

        match outcome {
            Ok(result) if !self.is_cancelled() => result,
            _ => Err(ApiError::Cancelled),
        }
    }
}
