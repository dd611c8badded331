// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{filter, try_filter, FilterStream};
use core::fmt;
use core::future::Future;
use futures::Stream;
use laneflow_core::StreamItem;

/// The filter operator with its predicate fixed, awaiting a source.
#[derive(Clone)]
pub struct Filter<F> {
    predicate: F,
}

impl<F> Filter<F> {
    pub const fn new(predicate: F) -> Self {
        Self { predicate }
    }

    /// Filters `source` with a copy of the predicate.
    pub fn apply<S, T, Fut>(&self, source: S) -> FilterStream<S, T, F, Fut>
    where
        S: Stream<Item = StreamItem<T>>,
        F: FnMut(&T) -> Fut + Clone,
        Fut: Future<Output = bool>,
    {
        filter(self.predicate.clone(), source)
    }

    pub fn apply_once<S, T, Fut>(self, source: S) -> FilterStream<S, T, F, Fut>
    where
        S: Stream<Item = StreamItem<T>>,
        F: FnMut(&T) -> Fut,
        Fut: Future<Output = bool>,
    {
        filter(self.predicate, source)
    }
}

impl<F> fmt::Debug for Filter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").finish_non_exhaustive()
    }
}

/// The fallible filter operator with its predicate fixed, awaiting a source.
#[derive(Clone)]
pub struct TryFilter<F> {
    predicate: F,
}

impl<F> TryFilter<F> {
    pub const fn new(predicate: F) -> Self {
        Self { predicate }
    }

    pub fn apply<S, T, Fut, E>(&self, source: S) -> FilterStream<S, T, F, Fut>
    where
        S: Stream<Item = StreamItem<T>>,
        F: FnMut(&T) -> Fut + Clone,
        Fut: Future<Output = Result<bool, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        try_filter(self.predicate.clone(), source)
    }

    pub fn apply_once<S, T, Fut, E>(self, source: S) -> FilterStream<S, T, F, Fut>
    where
        S: Stream<Item = StreamItem<T>>,
        F: FnMut(&T) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        try_filter(self.predicate, source)
    }
}

impl<F> fmt::Debug for TryFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFilter").finish_non_exhaustive()
    }
}
