// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrency limits for windowed operators.

use crate::error::{LaneflowError, Result};
use core::fmt;
use core::num::NonZeroUsize;
use core::str::FromStr;

/// How many invocations a windowed operator may keep outstanding at once.
///
/// A zero limit is unrepresentable: the fallible constructors reject it with
/// [`LaneflowError::InvalidConcurrency`] before any operator is built.
///
/// # Examples
///
/// ```
/// use laneflow_core::Concurrency;
///
/// let two = Concurrency::limited(2).unwrap();
/// assert_eq!(two.get(), Some(2));
///
/// assert!(Concurrency::limited(0).is_err());
/// assert_eq!("unbounded".parse::<Concurrency>().unwrap(), Concurrency::Unbounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concurrency {
    /// At most this many invocations in flight
    Limited(NonZeroUsize),
    /// No limit; admission is bounded only by the source
    Unbounded,
}

impl Concurrency {
    /// One invocation at a time, which yields results in input order.
    pub const SEQUENTIAL: Self = Self::Limited(NonZeroUsize::MIN);

    /// Builds a bounded limit.
    ///
    /// # Errors
    ///
    /// Returns [`LaneflowError::InvalidConcurrency`] when `limit` is zero.
    pub fn limited(limit: usize) -> Result<Self> {
        NonZeroUsize::new(limit)
            .map(Self::Limited)
            .ok_or(LaneflowError::invalid_concurrency(limit))
    }

    /// The numeric limit, or `None` when unbounded.
    #[must_use]
    pub const fn get(self) -> Option<usize> {
        match self {
            Self::Limited(n) => Some(n.get()),
            Self::Unbounded => None,
        }
    }

    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Whether `occupied` slots leave room for one more admission.
    #[must_use]
    pub const fn has_capacity(self, occupied: usize) -> bool {
        match self {
            Self::Limited(n) => occupied < n.get(),
            Self::Unbounded => true,
        }
    }
}

impl From<NonZeroUsize> for Concurrency {
    fn from(limit: NonZeroUsize) -> Self {
        Self::Limited(limit)
    }
}

impl TryFrom<usize> for Concurrency {
    type Error = LaneflowError;

    fn try_from(limit: usize) -> Result<Self> {
        Self::limited(limit)
    }
}

impl FromStr for Concurrency {
    type Err = LaneflowError;

    /// Accepts a positive integer, `"unbounded"` or `"inf"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unbounded") || s.eq_ignore_ascii_case("inf") {
            return Ok(Self::Unbounded);
        }
        let limit = s
            .parse::<usize>()
            .map_err(|e| LaneflowError::stream_error(format!("invalid concurrency '{s}': {e}")))?;
        Self::limited(limit)
    }
}

impl fmt::Display for Concurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}
