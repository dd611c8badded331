// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream operators for asynchronous pipelines.
//!
//! Both operators work on streams of [`StreamItem`](laneflow_core::StreamItem),
//! so values and failures travel through the same channel.
//!
//! - **[`transform`](crate::transform())**: maps items with at most `limit`
//!   invocations in flight and yields outcomes in completion order
//! - **[`filter`](crate::filter())**: keeps items whose (possibly asynchronous)
//!   predicate holds, in input order
//!
//! Every operator can be reached three ways that produce identical streams:
//!
//! | form | transform | filter |
//! |------|-----------|--------|
//! | free function | [`transform(limit, f, source)`](crate::transform()) | [`filter(predicate, source)`](crate::filter()) |
//! | extension trait | [`source.transform(limit, f)`](TransformExt::transform) | [`source.filter_with(predicate)`](FilterExt::filter_with) |
//! | partial application | [`Transform::new(limit).with(f).apply(source)`](Transform) | [`Filter::new(predicate).apply(source)`](Filter) |
//!
//! # Completion order
//!
//! ```rust
//! use futures::StreamExt;
//! use laneflow_core::{from_values, Concurrency, StreamItem};
//! use laneflow_stream::TransformExt;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let outcomes: Vec<u64> = from_values([30, 10, 20])
//!     .transform(Concurrency::Unbounded, |ms| async move {
//!         tokio::time::sleep(Duration::from_millis(ms)).await;
//!         ms
//!     })
//!     .map(StreamItem::unwrap)
//!     .collect()
//!     .await;
//!
//! assert_eq!(outcomes, vec![10, 20, 30]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod filter;
pub mod transform;

pub use self::filter::{filter, try_filter, Filter, FilterExt, FilterStream, TryFilter};
pub use self::transform::{
    transform, try_transform, Transform, TransformExt, TransformStream, TransformWith,
    TryTransformWith,
};
