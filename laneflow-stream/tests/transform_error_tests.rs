// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::future::{pending, ready};
use futures::stream::{self, FusedStream};
use futures::StreamExt;
use laneflow_core::{from_try_stream, from_values, Concurrency, LaneflowError, StreamItem};
use laneflow_stream::{try_transform, Transform, TransformExt};
use laneflow_test_utils::{
    delay_ticks, test_channel_with_errors, unwrap_value, ErrorInjectingStream, InFlightGauge,
};
use std::io;

fn fail_on_three(n: i32) -> futures::future::Ready<Result<i32, io::Error>> {
    ready(if n == 3 {
        Err(io::Error::other("three is not allowed"))
    } else {
        Ok(n)
    })
}

#[tokio::test]
async fn test_try_transform_delivers_failure_and_terminates() -> anyhow::Result<()> {
    // Arrange
    let mut stream = try_transform(Concurrency::SEQUENTIAL, fail_on_three, from_values(1..=5));

    // Act & Assert
    assert_eq!(unwrap_value(stream.next().await), 1);
    assert_eq!(unwrap_value(stream.next().await), 2);

    match stream.next().await {
        Some(StreamItem::Error(LaneflowError::UserError(e))) => {
            assert_eq!(e.to_string(), "three is not allowed");
        }
        other => panic!("Expected user error, got {other:?}"),
    }

    assert!(stream.is_terminated());
    assert!(stream.next().await.is_none());
    assert_eq!(stream.admitted(), 3);
    Ok(())
}

#[tokio::test]
async fn test_try_transform_failure_drops_outstanding_tasks() -> anyhow::Result<()> {
    // Arrange - everything but 1 hangs forever, 1 fails
    let gauge = InFlightGauge::new();
    let work = {
        let gauge = gauge.clone();
        move |n: i32| {
            gauge.track(async move {
                if n == 1 {
                    delay_ticks(2, ()).await;
                    return Err(io::Error::other("boom"));
                }
                pending::<()>().await;
                Ok(n)
            })
        }
    };
    let mut stream = from_values([1, 2, 3]).try_transform(Concurrency::limited(3)?, work);

    // Act
    let first = stream.next().await;

    // Assert
    assert!(matches!(first, Some(StreamItem::Error(LaneflowError::UserError(_)))));
    assert_eq!(gauge.max(), 3);
    assert_eq!(gauge.current(), 0);
    assert_eq!(stream.in_flight(), 0);
    assert!(stream.next().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_transform_source_error_follows_settled_outcomes() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel_with_errors();
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(LaneflowError::source_error("disk gone")))?;
    tx.send(StreamItem::Value(3))?;
    let mut stream = source.transform(Concurrency::limited(2)?, ready);

    // Act
    let first = stream.next().await;
    let second = stream.next().await;

    // Assert - 1 settled before the failure was read, 3 is never admitted
    assert_eq!(unwrap_value(first), 1);
    match second {
        Some(StreamItem::Error(LaneflowError::SourceError { context })) => {
            assert_eq!(context, "disk gone");
        }
        other => panic!("Expected source error, got {other:?}"),
    }
    assert_eq!(stream.admitted(), 1);
    assert_eq!(stream.delivered(), stream.admitted());
    assert!(stream.next().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_transform_source_error_output_does_not_depend_on_limit() -> anyhow::Result<()> {
    // Arrange
    let limits = [
        Concurrency::SEQUENTIAL,
        Concurrency::limited(2)?,
        Concurrency::limited(3)?,
        Concurrency::limited(8)?,
        Concurrency::Unbounded,
    ];

    for limit in limits {
        let (tx, source) = test_channel_with_errors();
        tx.send(StreamItem::Value(1))?;
        tx.send(StreamItem::Value(2))?;
        tx.send(StreamItem::Error(LaneflowError::source_error("eof")))?;

        // Act
        let mut stream = source.transform(limit, ready);
        let items: Vec<StreamItem<i32>> = (&mut stream).collect().await;

        // Assert
        assert_eq!(items.len(), 3, "limit {limit}");
        assert_eq!(items[0], StreamItem::Value(1), "limit {limit}");
        assert_eq!(items[1], StreamItem::Value(2), "limit {limit}");
        assert!(
            matches!(items[2], StreamItem::Error(LaneflowError::SourceError { .. })),
            "limit {limit}"
        );
        assert_eq!(stream.delivered(), 2, "limit {limit}");
    }
    Ok(())
}

#[tokio::test]
async fn test_transform_source_error_drops_running_tasks() -> anyhow::Result<()> {
    // Arrange
    let gauge = InFlightGauge::new();
    let (tx, source) = test_channel_with_errors();
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(LaneflowError::source_error("reset")))?;
    let work = {
        let gauge = gauge.clone();
        move |n: i32| {
            gauge.track(async move {
                pending::<()>().await;
                n
            })
        }
    };
    let mut stream = source.transform(Concurrency::limited(4)?, work);

    // Act
    let first = stream.next().await;

    // Assert
    assert!(matches!(
        first,
        Some(StreamItem::Error(LaneflowError::SourceError { .. }))
    ));
    assert_eq!(gauge.entered(), 1);
    assert_eq!(gauge.current(), 0);
    assert_eq!(stream.delivered(), 0);
    assert!(stream.next().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_transform_source_error_after_values() -> anyhow::Result<()> {
    // Arrange
    let source = ErrorInjectingStream::new(stream::iter(vec![1, 2, 3]), 2);
    let mut stream = source.transform(Concurrency::SEQUENTIAL, |n| delay_ticks(1, n));

    // Act
    let items: Vec<StreamItem<i32>> = (&mut stream).collect().await;

    // Assert
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], StreamItem::Value(1));
    assert_eq!(items[1], StreamItem::Value(2));
    assert!(matches!(
        items[2],
        StreamItem::Error(LaneflowError::SourceError { .. })
    ));
    assert!(stream.is_terminated());
    Ok(())
}

#[tokio::test]
async fn test_transform_fallible_source_maps_err_to_source_error() -> anyhow::Result<()> {
    // Arrange
    let source = from_try_stream(stream::iter(vec![
        Ok(1),
        Err(io::Error::other("truncated")),
        Ok(3),
    ]));
    let stream = source.transform(Concurrency::Unbounded, ready);

    // Act
    let items: Vec<StreamItem<i32>> = stream.collect().await;

    // Assert
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], StreamItem::Value(1));
    assert_eq!(
        items[1].clone().err().map(|e| e.to_string()),
        Some("Source error: truncated".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_transform_drop_cancels_in_flight_tasks() -> anyhow::Result<()> {
    // Arrange - only 1 ever finishes
    let gauge = InFlightGauge::new();
    let work = {
        let gauge = gauge.clone();
        move |n: i32| {
            gauge.track(async move {
                if n != 1 {
                    pending::<()>().await;
                }
                n
            })
        }
    };
    let mut stream = from_values(1..=10).transform(Concurrency::limited(3)?, work);

    // Act
    assert_eq!(unwrap_value(stream.next().await), 1);
    let running = gauge.current();
    drop(stream);

    // Assert
    assert_eq!(running, 2);
    assert_eq!(gauge.current(), 0);
    assert_eq!(gauge.entered(), 3);
    Ok(())
}

#[test]
fn test_zero_limit_is_rejected_before_any_operator_exists() {
    assert!(matches!(
        Concurrency::limited(0),
        Err(LaneflowError::InvalidConcurrency { limit: 0 })
    ));
    assert!(matches!(
        Concurrency::try_from(0usize),
        Err(LaneflowError::InvalidConcurrency { limit: 0 })
    ));
    assert!(matches!(
        Transform::try_new(0),
        Err(LaneflowError::InvalidConcurrency { limit: 0 })
    ));
    assert!("0".parse::<Concurrency>().is_err());
}
