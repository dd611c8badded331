// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use laneflow_core::{LaneflowError, StreamItem};
use laneflow_test_utils::{
    assert_no_element_emitted, assert_stream_ended, collect_values, test_channel,
    test_channel_with_errors, unwrap_stream, unwrap_value,
};

#[tokio::test]
async fn test_assert_no_element_emitted() {
    let (_tx, mut stream) = test_channel::<i32>();

    // This should pass as no elements are sent
    assert_no_element_emitted(&mut stream, 100).await;
}

#[tokio::test]
#[should_panic = "Timeout: No item received within 100 ms"]
async fn test_unwrap_stream_timeout() {
    let (_tx, mut stream) = test_channel::<i32>();

    unwrap_stream(&mut stream, 100).await;
}

#[tokio::test]
#[should_panic = "Expected StreamItem but stream ended"]
async fn test_unwrap_stream_empty() {
    let (tx, mut stream) = test_channel::<i32>();
    drop(tx);

    unwrap_stream(&mut stream, 500).await;
}

#[tokio::test]
#[should_panic = "Expected Value but got Error: Stream processing error: injected error"]
async fn test_unwrap_stream_error_injected() {
    let (tx, mut stream) = test_channel_with_errors::<i32>();

    tx.send(StreamItem::Error(LaneflowError::stream_error("injected error")))
        .unwrap();

    let item = unwrap_stream(&mut stream, 500).await;
    unwrap_value(Some(item));
}

#[tokio::test]
async fn test_assert_stream_ended_success() {
    let (tx, mut stream) = test_channel::<i32>();
    drop(tx);

    assert_stream_ended(&mut stream, 500).await;
}

#[tokio::test]
async fn test_collect_values_drains_in_order() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel();
    tx.send(1)?;
    tx.send(2)?;
    tx.send(3)?;
    drop(tx);

    // Act
    let values = collect_values(stream).await;

    // Assert
    assert_eq!(values, vec![1, 2, 3]);
    Ok(())
}
