// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::FusedStream;
use futures::{ready, Stream};
use laneflow_core::{LaneflowError, Source, StreamItem};
use pin_project::pin_project;

/// Stream returned by the filter operators.
#[pin_project(project = FilterStreamProj)]
#[must_use = "streams do nothing unless polled"]
pub struct FilterStream<S, T, F, Fut>
where
    Fut: Future,
{
    #[pin]
    source: Source<S>,
    predicate: F,
    // At most one evaluation is outstanding, together with the item it judges
    #[pin]
    pending: Option<Fut>,
    pending_item: Option<T>,
    verdict: fn(Fut::Output) -> Result<bool, LaneflowError>,
    terminated: bool,
}

impl<S, T, F, Fut> FilterStream<S, T, F, Fut>
where
    Fut: Future,
{
    pub(crate) fn new(
        predicate: F,
        source: S,
        verdict: fn(Fut::Output) -> Result<bool, LaneflowError>,
    ) -> Self {
        Self {
            source: Source::new(source),
            predicate,
            pending: None,
            pending_item: None,
            verdict,
            terminated: false,
        }
    }

    /// `true` while a predicate evaluation is awaiting completion.
    pub fn is_evaluating(&self) -> bool {
        self.pending_item.is_some()
    }
}

impl<S, T, F, Fut> Stream for FilterStream<S, T, F, Fut>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(&T) -> Fut,
    Fut: Future,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.terminated {
            return Poll::Ready(None);
        }

        loop {
            if let Some(evaluation) = this.pending.as_mut().as_pin_mut() {
                let output = ready!(evaluation.poll(cx));
                this.pending.set(None);
                let item = this.pending_item.take();

                match (this.verdict)(output) {
                    Ok(true) => {
                        if let Some(item) = item {
                            return Poll::Ready(Some(StreamItem::Value(item)));
                        }
                    }
                    Ok(false) => {}
                    Err(error) => {
                        warn!("filter predicate failed: {}", error);
                        *this.terminated = true;
                        return Poll::Ready(Some(StreamItem::Error(error)));
                    }
                }
                continue;
            }

            match ready!(this.source.as_mut().poll_advance(cx)) {
                Some(StreamItem::Value(item)) => {
                    this.pending.set(Some((this.predicate)(&item)));
                    *this.pending_item = Some(item);
                }
                Some(StreamItem::Error(error)) => {
                    warn!("filter source failed: {}", error);
                    *this.terminated = true;
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                None => {
                    *this.terminated = true;
                    return Poll::Ready(None);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.terminated {
            return (0, Some(0));
        }
        let (_, upper) = self.source.size_hint();
        let pending = usize::from(self.pending_item.is_some());
        (0, upper.and_then(|upper| upper.checked_add(pending)))
    }
}

impl<S, T, F, Fut> FusedStream for FilterStream<S, T, F, Fut>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(&T) -> Fut,
    Fut: Future,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<S, T, F, Fut> core::fmt::Debug for FilterStream<S, T, F, Fut>
where
    Fut: Future,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FilterStream")
            .field("evaluating", &self.pending_item.is_some())
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}
