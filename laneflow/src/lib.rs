// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Laneflow
//!
//! Composable operators over asynchronous sequences.
//!
//! - **transform**: runs an async mapping function over a stream with a bounded
//!   number of invocations in flight and yields results as they complete
//! - **filter**: keeps the items whose (possibly async) predicate holds
//! - **sources**: in-memory sequences, lazy streams, push-based producers and
//!   tokio channels all become the same pull-based [`Source`]
//!
//! Both operators can be applied all at once or one argument at a time
//! ([`Transform`], [`Filter`]), and every stage is reusable.
//!
//! ## Quick Start
//!
//! ```rust
//! use laneflow::prelude::*;
//! use futures::StreamExt;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! // Fetch two pages at a time, keep the non-empty ones
//! let fetch = Transform::try_new(2)?.with(|page: u64| async move {
//!     let millis = if page == 1 { 50 } else { 10 };
//!     tokio::time::sleep(Duration::from_millis(millis)).await;
//!     if page == 2 { String::new() } else { format!("page {page}") }
//! });
//! let non_empty = Filter::new(|body: &String| futures::future::ready(!body.is_empty()));
//!
//! let bodies: Vec<String> = non_empty
//!     .apply_once(fetch.apply_once(from_values(1..=3)))
//!     .map(StreamItem::unwrap)
//!     .collect()
//!     .await;
//!
//! // page 3 started after page 2 finished and still overtook page 1
//! assert_eq!(bodies, vec!["page 3", "page 1"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Failures travel in-band as [`StreamItem::Error`] and end the stream. See
//! [`LaneflowError`] for the kinds a consumer can observe.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod receiver_ext;

pub use laneflow_core::{
    from_stream, from_try_stream, from_values, push_source, Concurrency, IntoLaneflowError,
    IntoSource, LaneflowError, PushSource, Pusher, Result, ResultExt, Source, StreamItem,
};
pub use laneflow_stream::{
    filter, transform, try_filter, try_transform, Filter, FilterExt, FilterStream, Transform,
    TransformExt, TransformStream, TransformWith, TryFilter, TryTransformWith,
};
pub use receiver_ext::ReceiverExt;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::receiver_ext::ReceiverExt;
    pub use laneflow_core::{
        from_stream, from_try_stream, from_values, push_source, Concurrency, IntoSource,
        LaneflowError, StreamItem,
    };
    pub use laneflow_stream::{Filter, FilterExt, Transform, TransformExt, TryFilter};
}
