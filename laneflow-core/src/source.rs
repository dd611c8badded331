// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pull-based source adapter.
//!
//! Operators never consume their input directly; they wrap it in a [`Source`],
//! which turns any `Stream<Item = StreamItem<T>>` into a sequence with
//! idempotent exhaustion: once it has returned `None`, or handed out an
//! `Error`, every further pull returns `None` without touching the underlying
//! stream again.
//!
//! The constructors in this module normalise the three kinds of input:
//!
//! | input | constructor | pending? |
//! |-------|-------------|----------|
//! | finite in-memory sequence | [`from_values`] | never |
//! | lazily produced sequence | [`from_stream`], [`from_try_stream`] | whenever the producer is |
//! | push-based stream | [`push_source`](crate::push_source::push_source) | until a value is pushed or the stream ends |

use crate::error::LaneflowError;
use crate::stream_item::StreamItem;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{self, FusedStream};
use futures::{Stream, StreamExt};
use pin_project::pin_project;

/// A fused, pull-based view over a stream of [`StreamItem`]s.
///
/// # Example
///
/// ```rust
/// use laneflow_core::source::from_values;
///
/// # futures::executor::block_on(async {
/// let mut source = from_values([1, 2]);
/// assert_eq!(source.advance().await.unwrap().unwrap(), 1);
/// assert_eq!(source.advance().await.unwrap().unwrap(), 2);
/// assert!(source.advance().await.is_none());
/// assert!(source.advance().await.is_none());
/// # });
/// ```
#[pin_project]
#[derive(Debug)]
pub struct Source<S> {
    #[pin]
    inner: S,
    exhausted: bool,
    pulled: usize,
}

impl<S> Source<S> {
    /// Wraps a stream that already yields [`StreamItem`]s.
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            exhausted: false,
            pulled: 0,
        }
    }

    /// `true` once the source has ended or failed.
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of items (values and errors) handed out so far.
    pub const fn pulled(&self) -> usize {
        self.pulled
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, T> Source<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    /// Polls for the next item.
    ///
    /// Returns `Poll::Ready(None)` forever once the underlying stream ended or
    /// yielded an error.
    pub fn poll_advance(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<StreamItem<T>>> {
        let this = self.project();
        if *this.exhausted {
            return Poll::Ready(None);
        }

        match this.inner.poll_next(cx) {
            Poll::Ready(Some(item)) => {
                *this.pulled += 1;
                if item.is_error() {
                    *this.exhausted = true;
                }
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                *this.exhausted = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    /// Pulls the next item, suspending until one is available or the source ends.
    pub async fn advance(&mut self) -> Option<StreamItem<T>>
    where
        S: Unpin,
    {
        self.next().await
    }
}

impl<S, T> Stream for Source<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.poll_advance(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            (0, Some(0))
        } else {
            self.inner.size_hint()
        }
    }
}

impl<S, T> FusedStream for Source<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    fn is_terminated(&self) -> bool {
        self.exhausted
    }
}

/// Source over a finite in-memory sequence. Never pending.
pub fn from_values<I>(values: I) -> Source<impl Stream<Item = StreamItem<I::Item>> + Unpin>
where
    I: IntoIterator,
    I::IntoIter: Unpin,
{
    Source::new(stream::iter(values).map(StreamItem::Value))
}

/// Source over a lazily produced sequence.
///
/// Each pull forwards to the underlying stream; nothing is read ahead.
pub fn from_stream<S>(stream: S) -> Source<impl Stream<Item = StreamItem<S::Item>>>
where
    S: Stream,
{
    Source::new(stream.map(StreamItem::Value))
}

/// Source over a fallible lazily produced sequence.
///
/// The first `Err` becomes a terminal [`LaneflowError::SourceError`].
pub fn from_try_stream<S, T, E>(stream: S) -> Source<impl Stream<Item = StreamItem<T>>>
where
    S: Stream<Item = Result<T, E>>,
    E: core::fmt::Display,
{
    Source::new(stream.map(|result| match result {
        Ok(value) => StreamItem::Value(value),
        Err(e) => StreamItem::Error(LaneflowError::source_error(e.to_string())),
    }))
}

/// Converts any stream of [`StreamItem`]s into a [`Source`].
///
/// Blanket-implemented, so operators and callers can write
/// `stream.into_source()` instead of naming [`Source::new`].
pub trait IntoSource<T>: Stream<Item = StreamItem<T>> + Sized {
    fn into_source(self) -> Source<Self> {
        Source::new(self)
    }
}

impl<S, T> IntoSource<T> for S where S: Stream<Item = StreamItem<T>> {}
