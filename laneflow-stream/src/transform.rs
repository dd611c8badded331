// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrency-bounded mapping in completion order.
//!
//! `transform` pulls items from its source lazily, starts the mapping function
//! for each one while fewer than `limit` tasks occupy the window, and yields
//! every outcome as soon as it settles. Outcomes that settle during the same
//! poll are yielded in the order their items were admitted.
//!
//! A slot is released when its outcome is handed to the consumer, not when the
//! task settles: settled outcomes waiting in the ready queue still count
//! against the limit, which bounds buffered results to `limit` as well.
//!
//! # Behavior
//!
//! - Nothing is pulled from the source until the stream is first polled
//! - With a limit of 1 the output follows input order
//! - With [`Concurrency::Unbounded`] every item the source has ready is admitted
//!   at once
//! - A source error stops admission and drops the tasks still running; the
//!   outcomes that already settled are yielded first, then the error, then the
//!   stream ends
//! - A failed task (see [`try_transform`]) yields its error where its value
//!   would have been, then the stream ends
//! - Dropping the stream drops every running task
//!
//! # Example
//!
//! ```rust
//! use futures::future::ready;
//! use futures::StreamExt;
//! use laneflow_core::{from_values, Concurrency, StreamItem};
//! use laneflow_stream::TransformExt;
//!
//! # futures::executor::block_on(async {
//! let doubled: Vec<_> = from_values([1, 2, 3])
//!     .transform(Concurrency::limited(2).unwrap(), |n| ready(n * 2))
//!     .map(StreamItem::unwrap)
//!     .collect()
//!     .await;
//!
//! assert_eq!(doubled, vec![2, 4, 6]);
//! # });
//! ```

mod builder;
mod stream;
mod window;

pub use builder::{Transform, TransformWith, TryTransformWith};
pub use stream::TransformStream;

use core::future::Future;
use futures::Stream;
use laneflow_core::{Concurrency, StreamItem};

/// Maps `source` through `f` with at most `limit` invocations outstanding.
///
/// Synchronous mapping functions return [`futures::future::ready`].
pub fn transform<S, T, F, Fut>(
    limit: Concurrency,
    f: F,
    source: S,
) -> TransformStream<S, F, Fut, Fut::Output>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future,
{
    TransformStream::new(limit, f, source, StreamItem::Value)
}

/// Like [`transform`], for mapping functions that can fail.
///
/// An `Err` is yielded as [`LaneflowError::UserError`](laneflow_core::LaneflowError::UserError)
/// and ends the stream.
pub fn try_transform<S, T, F, Fut, U, E>(
    limit: Concurrency,
    f: F,
    source: S,
) -> TransformStream<S, F, Fut, U>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    TransformStream::new(limit, f, source, StreamItem::from_user_result)
}

/// Extension trait providing the transform operators on any stream of
/// [`StreamItem`]s.
pub trait TransformExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Method form of [`transform`](crate::transform()).
    fn transform<F, Fut>(self, limit: Concurrency, f: F) -> TransformStream<Self, F, Fut, Fut::Output>
    where
        F: FnMut(T) -> Fut,
        Fut: Future,
    {
        transform(limit, f, self)
    }

    /// Method form of [`try_transform`].
    fn try_transform<F, Fut, U, E>(self, limit: Concurrency, f: F) -> TransformStream<Self, F, Fut, U>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<U, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        try_transform(limit, f, self)
    }
}

impl<S, T> TransformExt<T> for S where S: Stream<Item = StreamItem<T>> {}
