// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use pin_project::pin_project;
use std::collections::VecDeque;

/// One invocation of the mapping function, tagged with its admission number.
#[pin_project]
pub(crate) struct Task<Fut> {
    seq: u64,
    #[pin]
    future: Fut,
}

impl<Fut: Future> Future for Task<Fut> {
    type Output = (u64, Fut::Output);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let seq = *this.seq;
        this.future.poll(cx).map(|output| (seq, output))
    }
}

/// Tasks admitted but not yet delivered.
///
/// A slot stays occupied from admission until its outcome is popped from the
/// ready queue, so `len()` counts both running tasks and settled outcomes
/// waiting for the consumer.
pub(crate) struct Window<Fut: Future> {
    in_flight: FuturesUnordered<Task<Fut>>,
    ready: VecDeque<Fut::Output>,
    next_seq: u64,
}

impl<Fut: Future> Window<Fut> {
    pub(crate) fn new() -> Self {
        Self {
            in_flight: FuturesUnordered::new(),
            ready: VecDeque::new(),
            next_seq: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.in_flight.len() + self.ready.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub(crate) fn ready_len(&self) -> usize {
        self.ready.len()
    }

    /// Number of tasks ever admitted.
    pub(crate) fn admitted(&self) -> u64 {
        self.next_seq
    }

    /// Occupies a slot with a freshly created invocation. It is first polled
    /// by the next [`poll_settle`](Self::poll_settle).
    pub(crate) fn admit(&mut self, future: Fut) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.push(Task { seq, future });
    }

    pub(crate) fn pop_ready(&mut self) -> Option<Fut::Output> {
        self.ready.pop_front()
    }

    /// Polls the running tasks once and queues everything that settled.
    ///
    /// Outcomes settling in the same step are queued in admission order.
    /// Returns how many settled.
    pub(crate) fn poll_settle(&mut self, cx: &mut Context<'_>) -> usize {
        let mut batch = Vec::new();
        while let Poll::Ready(Some(settled)) = self.in_flight.poll_next_unpin(cx) {
            batch.push(settled);
        }

        batch.sort_unstable_by_key(|(seq, _)| *seq);
        let settled = batch.len();
        self.ready.extend(batch.into_iter().map(|(_, output)| output));
        settled
    }

    /// Drops the running tasks and keeps settled outcomes queued.
    pub(crate) fn cancel_in_flight(&mut self) -> usize {
        let cancelled = self.in_flight.len();
        self.in_flight.clear();
        cancelled
    }

    /// Drops every running task and queued outcome.
    pub(crate) fn clear(&mut self) {
        self.in_flight.clear();
        self.ready.clear();
    }
}

impl<Fut: Future> Drop for Window<Fut> {
    fn drop(&mut self) {
        if !self.in_flight.is_empty() {
            debug!(
                "transform dropped with {} task(s) in flight and {} outcome(s) undelivered",
                self.in_flight.len(),
                self.ready.len()
            );
        }
    }
}
