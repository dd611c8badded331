// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the laneflow operators.
//!
//! This crate provides helpers for driving and observing stream operators in
//! tests. It is designed for use in development and testing only, not for
//! production code.
//!
//! # Key Types
//!
//! - [`delay_ticks`] and [`latency`] stand in for asynchronous work that takes
//!   a number of scheduler turns or a span of (usually paused) time
//! - [`InFlightGauge`] counts how many invocations are running at once
//! - [`test_channel`] and [`test_channel_with_errors`] feed a stream
//!   imperatively from the test body
//! - [`ErrorInjectingStream`] turns one position of a stream into a failure
//!
//! # Example
//!
//! ```rust
//! use laneflow_test_utils::{delay_ticks, InFlightGauge};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let gauge = InFlightGauge::new();
//!
//! let value = {
//!     let _guard = gauge.enter();
//!     assert_eq!(gauge.current(), 1);
//!     delay_ticks(3, "done").await
//! };
//!
//! assert_eq!(value, "done");
//! assert_eq!(gauge.current(), 0);
//! assert_eq!(gauge.max(), 1);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod delays;
pub mod error_injection;
pub mod gauge;
pub mod helpers;

use futures::{Stream, StreamExt};
use laneflow_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use delays::{delay_ticks, latency};
pub use error_injection::ErrorInjectingStream;
pub use gauge::{InFlightGauge, InFlightGuard};
pub use helpers::{
    assert_no_element_emitted, assert_stream_ended, collect_values, unwrap_stream, unwrap_value,
};

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
///
/// # Example
///
/// ```rust
/// use laneflow_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, mut stream) = test_channel();
///
/// tx.send(7).unwrap();
///
/// // Option -> StreamItem -> Value
/// assert_eq!(stream.next().await.unwrap().unwrap(), 7);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` for testing error propagation.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
