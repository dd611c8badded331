// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use laneflow_core::StreamItem;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;

/// Asserts that `stream` stays silent for `timeout_ms` milliseconds.
///
/// # Panics
///
/// Panics if the stream yields an item or ends within the timeout.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected item emitted, expected no output.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Asserts that `stream` ends within `timeout_ms` milliseconds.
///
/// # Panics
///
/// Panics if the stream yields an item or stays open past the timeout.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            if let Some(item) = item {
                panic!("Expected stream to end but got: {item:?}");
            }
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("Timeout: stream did not end within {timeout_ms} ms");
        }
    }
}

/// Waits up to `timeout_ms` milliseconds for the next item.
///
/// # Panics
///
/// Panics if the stream ends or the timeout elapses first.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            match item {
                Some(item) => item,
                None => panic!("Expected StreamItem but stream ended"),
            }
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("Timeout: No item received within {timeout_ms} ms");
        }
    }
}

/// Unwraps the value of a pulled item.
///
/// # Panics
///
/// Panics on `None` or on an `Error` item.
pub fn unwrap_value<T>(item: Option<StreamItem<T>>) -> T {
    match item {
        Some(StreamItem::Value(value)) => value,
        Some(StreamItem::Error(e)) => panic!("Expected Value but got Error: {e}"),
        None => panic!("Expected Value but stream ended"),
    }
}

/// Drains `stream`, unwrapping every item.
///
/// # Panics
///
/// Panics on the first `Error` item.
pub async fn collect_values<S, T>(stream: S) -> Vec<T>
where
    S: Stream<Item = StreamItem<T>>,
{
    stream
        .map(|item| unwrap_value(Some(item)))
        .collect()
        .await
}
