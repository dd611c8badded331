// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods for tokio receivers to create laneflow sources.

use futures::{Stream, StreamExt};
use laneflow_core::{Source, StreamItem};
use tokio::sync::mpsc;
use tokio_stream::wrappers::{ReceiverStream, UnboundedReceiverStream};

/// Extension trait turning a tokio mpsc receiver into a push-based [`Source`].
///
/// Every message becomes a `StreamItem::Value`; the source ends once every
/// sender is dropped and the buffered messages are drained.
///
/// # Examples
///
/// ```rust
/// use laneflow::prelude::*;
/// use futures::future::ready;
/// use futures::StreamExt;
/// use tokio::sync::mpsc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, rx) = mpsc::unbounded_channel();
/// tx.send(2).unwrap();
/// tx.send(3).unwrap();
/// drop(tx);
///
/// let squares: Vec<i32> = rx
///     .into_laneflow_source()
///     .transform(Concurrency::SEQUENTIAL, |n: i32| ready(n * n))
///     .map(StreamItem::unwrap)
///     .collect()
///     .await;
///
/// assert_eq!(squares, vec![4, 9]);
/// # }
/// ```
pub trait ReceiverExt<T> {
    /// The underlying item stream of the source.
    type Items: Stream<Item = StreamItem<T>> + Unpin;

    fn into_laneflow_source(self) -> Source<Self::Items>;
}

type Values<S, T> = futures::stream::Map<S, fn(T) -> StreamItem<T>>;

impl<T> ReceiverExt<T> for mpsc::UnboundedReceiver<T> {
    type Items = Values<UnboundedReceiverStream<T>, T>;

    fn into_laneflow_source(self) -> Source<Self::Items> {
        Source::new(UnboundedReceiverStream::new(self).map(StreamItem::Value as fn(T) -> _))
    }
}

impl<T> ReceiverExt<T> for mpsc::Receiver<T> {
    type Items = Values<ReceiverStream<T>, T>;

    fn into_laneflow_source(self) -> Source<Self::Items> {
        Source::new(ReceiverStream::new(self).map(StreamItem::Value as fn(T) -> _))
    }
}
