// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Partial application of the transform operators.
//!
//! A [`Transform`] fixes the limit, [`Transform::with`] fixes the mapping
//! function, and [`TransformWith::apply`] supplies the source. Every stage is
//! a plain value that can be stored and reused; applying a stage produces the
//! same stream as calling [`transform`](crate::transform()) with all three
//! arguments.
//!
//! ```rust
//! use futures::future::ready;
//! use futures::StreamExt;
//! use laneflow_core::{from_values, StreamItem};
//! use laneflow_stream::Transform;
//!
//! # futures::executor::block_on(async {
//! let two_at_a_time = Transform::try_new(2).unwrap();
//! let square = two_at_a_time.with(|n: u32| ready(n * n));
//!
//! let first: Vec<_> = square.apply(from_values([1, 2])).map(StreamItem::unwrap).collect().await;
//! let second: Vec<_> = square.apply(from_values([3])).map(StreamItem::unwrap).collect().await;
//!
//! assert_eq!(first, vec![1, 4]);
//! assert_eq!(second, vec![9]);
//! # });
//! ```

use super::{transform, try_transform, TransformStream};
use core::fmt;
use core::future::Future;
use futures::Stream;
use laneflow_core::{Concurrency, Result, StreamItem};

/// The transform operator with only its concurrency limit fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    limit: Concurrency,
}

impl Transform {
    pub const fn new(limit: Concurrency) -> Self {
        Self { limit }
    }

    /// Builds the operator from a raw limit.
    ///
    /// # Errors
    ///
    /// Returns [`LaneflowError::InvalidConcurrency`](laneflow_core::LaneflowError::InvalidConcurrency)
    /// when `limit` is zero.
    pub fn try_new(limit: usize) -> Result<Self> {
        Concurrency::limited(limit).map(Self::new)
    }

    pub const fn unbounded() -> Self {
        Self::new(Concurrency::Unbounded)
    }

    pub const fn limit(&self) -> Concurrency {
        self.limit
    }

    /// Fixes the mapping function.
    pub fn with<F>(self, f: F) -> TransformWith<F> {
        TransformWith {
            limit: self.limit,
            f,
        }
    }

    /// Fixes a fallible mapping function.
    pub fn try_with<F>(self, f: F) -> TryTransformWith<F> {
        TryTransformWith {
            limit: self.limit,
            f,
        }
    }
}

impl From<Concurrency> for Transform {
    fn from(limit: Concurrency) -> Self {
        Self::new(limit)
    }
}

/// The transform operator with its limit and mapping function fixed.
#[derive(Clone)]
pub struct TransformWith<F> {
    limit: Concurrency,
    f: F,
}

impl<F> TransformWith<F> {
    pub const fn limit(&self) -> Concurrency {
        self.limit
    }

    /// Runs a copy of the operator over `source`.
    pub fn apply<S, T, Fut>(&self, source: S) -> TransformStream<S, F, Fut, Fut::Output>
    where
        S: Stream<Item = StreamItem<T>>,
        F: FnMut(T) -> Fut + Clone,
        Fut: Future,
    {
        transform(self.limit, self.f.clone(), source)
    }

    /// Runs the operator over `source`, consuming it.
    pub fn apply_once<S, T, Fut>(self, source: S) -> TransformStream<S, F, Fut, Fut::Output>
    where
        S: Stream<Item = StreamItem<T>>,
        F: FnMut(T) -> Fut,
        Fut: Future,
    {
        transform(self.limit, self.f, source)
    }
}

impl<F> fmt::Debug for TransformWith<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformWith")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

/// The fallible transform operator with its limit and mapping function fixed.
#[derive(Clone)]
pub struct TryTransformWith<F> {
    limit: Concurrency,
    f: F,
}

impl<F> TryTransformWith<F> {
    pub const fn limit(&self) -> Concurrency {
        self.limit
    }

    /// Runs a copy of the operator over `source`.
    pub fn apply<S, T, Fut, U, E>(&self, source: S) -> TransformStream<S, F, Fut, U>
    where
        S: Stream<Item = StreamItem<T>>,
        F: FnMut(T) -> Fut + Clone,
        Fut: Future<Output = core::result::Result<U, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        try_transform(self.limit, self.f.clone(), source)
    }

    /// Runs the operator over `source`, consuming it.
    pub fn apply_once<S, T, Fut, U, E>(self, source: S) -> TransformStream<S, F, Fut, U>
    where
        S: Stream<Item = StreamItem<T>>,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = core::result::Result<U, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        try_transform(self.limit, self.f, source)
    }
}

impl<F> fmt::Debug for TryTransformWith<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryTransformWith")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
