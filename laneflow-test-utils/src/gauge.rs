// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrency observation for mapping functions under test.

use core::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    current: AtomicUsize,
    max: AtomicUsize,
    entered: AtomicUsize,
}

/// Shared counter of invocations currently running.
///
/// Clones observe the same counters, so a clone can move into a mapping
/// function while the test keeps another to assert on.
#[derive(Debug, Clone, Default)]
pub struct InFlightGauge {
    counters: Arc<Counters>,
}

impl InFlightGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one invocation as running until the returned guard is dropped.
    pub fn enter(&self) -> InFlightGuard {
        let counters = &self.counters;
        let now = counters.current.fetch_add(1, Ordering::SeqCst) + 1;
        counters.max.fetch_max(now, Ordering::SeqCst);
        counters.entered.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            counters: Arc::clone(counters),
        }
    }

    pub fn current(&self) -> usize {
        self.counters.current.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous invocations seen so far.
    pub fn max(&self) -> usize {
        self.counters.max.load(Ordering::SeqCst)
    }

    /// Total number of invocations started.
    pub fn entered(&self) -> usize {
        self.counters.entered.load(Ordering::SeqCst)
    }

    /// Runs `future` as one tracked invocation.
    ///
    /// The invocation counts from its first poll until it completes or is
    /// dropped. The returned future owns a handle to the counters, so it can
    /// outlive the closure that created it.
    pub fn track<F: Future>(&self, future: F) -> impl Future<Output = F::Output> {
        let gauge = self.clone();
        async move {
            let _guard = gauge.enter();
            future.await
        }
    }
}

/// Keeps an invocation counted in its [`InFlightGauge`] while alive.
#[derive(Debug)]
pub struct InFlightGuard {
    counters: Arc<Counters>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.counters.current.fetch_sub(1, Ordering::SeqCst);
    }
}
