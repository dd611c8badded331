// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::window::Window;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::FusedStream;
use futures::Stream;
use laneflow_core::{Concurrency, LaneflowError, Source, StreamItem};
use pin_project::pin_project;

/// Stream returned by the transform operators.
///
/// Runs the mapping function on up to `limit` source items at once and yields
/// the outcomes in the order they complete. Created by
/// [`transform`](crate::transform()), [`try_transform`](crate::try_transform),
/// [`TransformExt`](crate::TransformExt) or a [`Transform`](crate::Transform)
/// builder.
#[pin_project(project = TransformStreamProj)]
#[must_use = "streams do nothing unless polled"]
pub struct TransformStream<S, F, Fut, U>
where
    Fut: Future,
{
    #[pin]
    source: Source<S>,
    f: F,
    limit: Concurrency,
    window: Window<Fut>,
    settle: fn(Fut::Output) -> StreamItem<U>,
    held_error: Option<LaneflowError>,
    terminated: bool,
    delivered: u64,
}

impl<S, F, Fut, U> TransformStream<S, F, Fut, U>
where
    Fut: Future,
{
    pub(crate) fn new(
        limit: Concurrency,
        f: F,
        source: S,
        settle: fn(Fut::Output) -> StreamItem<U>,
    ) -> Self {
        Self {
            source: Source::new(source),
            f,
            limit,
            window: Window::new(),
            settle,
            held_error: None,
            terminated: false,
            delivered: 0,
        }
    }

    pub fn limit(&self) -> Concurrency {
        self.limit
    }

    /// Invocations started and not yet settled.
    pub fn in_flight(&self) -> usize {
        self.window.in_flight()
    }

    /// Settled outcomes waiting to be delivered.
    pub fn ready_len(&self) -> usize {
        self.window.ready_len()
    }

    /// Source items handed to the mapping function so far.
    pub fn admitted(&self) -> u64 {
        self.window.admitted()
    }

    /// Outcomes handed to the consumer so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl<S, T, F, Fut, U> TransformStreamProj<'_, S, F, Fut, U>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future,
{
    /// Fills free slots from the source until the window is full, the source
    /// has nothing ready, or it fails.
    fn admit(&mut self, cx: &mut Context<'_>) {
        while self.held_error.is_none() && self.limit.has_capacity(self.window.len()) {
            match self.source.as_mut().poll_advance(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    self.window.admit((self.f)(value));
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    *self.held_error = Some(error);
                    self.retire(cx);
                }
                Poll::Ready(None) | Poll::Pending => break,
            }
        }
    }

    /// Keeps what has already settled for delivery and drops the rest.
    fn retire(&mut self, cx: &mut Context<'_>) {
        self.window.poll_settle(cx);
        let cancelled = self.window.cancel_in_flight();
        if cancelled > 0 {
            debug!("transform source failed, dropped {} running task(s)", cancelled);
        }
    }

    fn terminate(&mut self) {
        *self.terminated = true;
        self.window.clear();
    }
}

impl<S, T, F, Fut, U> Stream for TransformStream<S, F, Fut, U>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.terminated {
            return Poll::Ready(None);
        }

        loop {
            if let Some(output) = this.window.pop_ready() {
                *this.delivered += 1;
                let item = (this.settle)(output);

                if let StreamItem::Error(error) = &item {
                    warn!(
                        "transform task failed, dropping {} pending task(s): {}",
                        this.window.len(),
                        error
                    );
                    this.terminate();
                } else {
                    // Refill the freed slot before handing the outcome over
                    this.admit(cx);
                }
                return Poll::Ready(Some(item));
            }

            // A failed source goes out once the settled outcomes are drained
            if let Some(error) = this.held_error.take() {
                warn!("transform source failed: {}", error);
                this.terminate();
                return Poll::Ready(Some(StreamItem::Error(error)));
            }

            this.admit(cx);
            if this.held_error.is_some() {
                continue;
            }

            if this.window.poll_settle(cx) > 0 {
                continue;
            }

            if this.source.is_exhausted() && this.window.is_empty() {
                *this.terminated = true;
                return Poll::Ready(None);
            }

            return Poll::Pending;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.terminated {
            return (0, Some(0));
        }

        // Every admitted item yields at most one outcome and any failure ends
        // the stream early, so only an upper bound is known.
        let pending = self.window.len() + usize::from(self.held_error.is_some());
        let (_, upper) = self.source.size_hint();
        (0, upper.and_then(|upper| upper.checked_add(pending)))
    }
}

impl<S, T, F, Fut, U> FusedStream for TransformStream<S, F, Fut, U>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<S, F, Fut, U> core::fmt::Debug for TransformStream<S, F, Fut, U>
where
    Fut: Future,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransformStream")
            .field("limit", &self.limit)
            .field("in_flight", &self.window.in_flight())
            .field("ready", &self.window.ready_len())
            .field("admitted", &self.window.admitted())
            .field("delivered", &self.delivered)
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}
