// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{self, FusedStream};
use futures::{Stream, StreamExt};
use laneflow_core::{
    from_stream, from_try_stream, from_values, IntoSource, LaneflowError, Source, StreamItem,
};
use std::io;

#[tokio::test]
async fn test_from_values_yields_in_order() {
    // Arrange
    let mut source = from_values(vec![1, 2, 3]);

    // Act
    let values: Vec<i32> = (&mut source).map(StreamItem::unwrap).collect().await;

    // Assert
    assert_eq!(values, vec![1, 2, 3]);
    assert!(source.is_exhausted());
    assert_eq!(source.pulled(), 3);
}

#[tokio::test]
async fn test_exhaustion_is_idempotent() {
    // Arrange
    let mut source = from_values(Vec::<i32>::new());

    // Act & Assert
    assert!(!source.is_terminated());
    assert!(source.advance().await.is_none());
    assert!(source.advance().await.is_none());
    assert!(source.advance().await.is_none());
    assert!(source.is_terminated());
    assert_eq!(source.size_hint(), (0, Some(0)));
}

#[tokio::test]
async fn test_from_stream_forwards_lazily() {
    // Arrange
    let produced = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = produced.clone();
    let lazy = stream::iter(1..=3).map(move |x| {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        x
    });
    let mut source = Box::pin(from_stream(lazy));

    // Act & Assert
    assert_eq!(produced.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert_eq!(source.next().await.unwrap().unwrap(), 1);
    assert_eq!(produced.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(source.next().await.unwrap().unwrap(), 2);
    assert_eq!(produced.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_from_try_stream_terminates_on_error() {
    // Arrange
    let items: Vec<Result<i32, io::Error>> =
        vec![Ok(1), Err(io::Error::other("broken pipe")), Ok(3)];
    let mut source = Box::pin(from_try_stream(stream::iter(items)));

    // Act & Assert
    assert_eq!(source.next().await.unwrap().unwrap(), 1);
    match source.next().await {
        Some(StreamItem::Error(LaneflowError::SourceError { context })) => {
            assert_eq!(context, "broken pipe");
        }
        other => panic!("expected source error, got {other:?}"),
    }
    assert!(source.next().await.is_none());
    assert!(source.is_terminated());
}

#[tokio::test]
async fn test_new_wraps_stream_items() {
    // Arrange
    let items = vec![
        StreamItem::Value(1),
        StreamItem::Error(LaneflowError::stream_error("stop")),
        StreamItem::Value(2),
    ];
    let mut source = Source::new(stream::iter(items));

    // Act & Assert
    assert!(source.advance().await.unwrap().is_value());
    assert!(source.advance().await.unwrap().is_error());
    assert!(source.advance().await.is_none());
    assert_eq!(source.pulled(), 2);
}

#[tokio::test]
async fn test_size_hint_follows_inner() {
    let source = from_values([1, 2, 3]);
    assert_eq!(source.size_hint(), (3, Some(3)));
}

#[tokio::test]
async fn test_into_source_wraps_item_stream() -> anyhow::Result<()> {
    // Arrange
    let items = stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)]);

    // Act
    let mut source = items.into_source();

    // Assert
    assert_eq!(source.advance().await.map(StreamItem::unwrap), Some(1));
    assert_eq!(source.advance().await.map(StreamItem::unwrap), Some(2));
    assert!(source.advance().await.is_none());
    assert!(source.is_exhausted());
    Ok(())
}
