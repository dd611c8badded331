// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filtering with a possibly asynchronous predicate.
//!
//! Items are judged one at a time: the next source item is not pulled until
//! the predicate for the current one has completed, so the output keeps the
//! input order.
//!
//! # Behavior
//!
//! - Predicate receives a reference to the item and returns a future of `bool`
//! - Synchronous predicates return [`futures::future::ready`]
//! - Only items whose predicate resolves to `true` are emitted
//! - Source errors are passed through and end the stream
//! - A failed predicate (see [`try_filter`]) yields its error and ends the stream
//!
//! # Example
//!
//! ```rust
//! use futures::future::ready;
//! use futures::StreamExt;
//! use laneflow_core::{from_values, StreamItem};
//! use laneflow_stream::FilterExt;
//!
//! # futures::executor::block_on(async {
//! let present: Vec<_> = from_values([Some(1), None, Some(3)])
//!     .filter_with(|n: &Option<i32>| ready(n.is_some()))
//!     .map(StreamItem::unwrap)
//!     .collect()
//!     .await;
//!
//! assert_eq!(present, vec![Some(1), Some(3)]);
//! # });
//! ```

mod builder;
mod stream;

pub use builder::{Filter, TryFilter};
pub use stream::FilterStream;

use core::future::Future;
use futures::Stream;
use laneflow_core::{LaneflowError, StreamItem};

/// Keeps the items of `source` for which `predicate` resolves to `true`.
pub fn filter<S, T, F, Fut>(predicate: F, source: S) -> FilterStream<S, T, F, Fut>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = bool>,
{
    FilterStream::new(predicate, source, Ok)
}

/// Like [`filter`], for predicates that can fail.
///
/// An `Err` is yielded as [`LaneflowError::UserError`] and ends the stream.
pub fn try_filter<S, T, F, Fut, E>(predicate: F, source: S) -> FilterStream<S, T, F, Fut>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    FilterStream::new(predicate, source, user_verdict)
}

fn user_verdict<E>(verdict: Result<bool, E>) -> Result<bool, LaneflowError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    verdict.map_err(LaneflowError::user_error)
}

/// Extension trait providing the filter operators on any stream of
/// [`StreamItem`]s.
///
/// The methods carry a `_with` suffix to stay clear of
/// [`StreamExt::filter`](futures::StreamExt::filter).
pub trait FilterExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Method form of [`filter`](crate::filter()).
    fn filter_with<F, Fut>(self, predicate: F) -> FilterStream<Self, T, F, Fut>
    where
        F: FnMut(&T) -> Fut,
        Fut: Future<Output = bool>,
    {
        filter(predicate, self)
    }

    /// Method form of [`try_filter`].
    fn try_filter_with<F, Fut, E>(self, predicate: F) -> FilterStream<Self, T, F, Fut>
    where
        F: FnMut(&T) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        try_filter(predicate, self)
    }
}

impl<S, T> FilterExt<T> for S where S: Stream<Item = StreamItem<T>> {}
