// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::future::ready;
use futures::stream;
use laneflow_core::{from_stream, from_values, Concurrency};
use laneflow_stream::{filter, transform, Filter, FilterExt, Transform, TransformExt, TryFilter};
use laneflow_test_utils::{collect_values, delay_ticks};
use std::io;

fn load(id: u32) -> futures::future::Ready<(u32, &'static str)> {
    ready((id, "loaded"))
}

#[tokio::test]
async fn test_transform_curry_concurrency_and_function() -> anyhow::Result<()> {
    // Arrange
    let two_at_a_time = Transform::try_new(2)?;
    let load_two_at_a_time = two_at_a_time.with(load);

    // Act
    let values = collect_values(load_two_at_a_time.apply(from_stream(stream::iter(1..=4)))).await;

    // Assert
    assert_eq!(
        values,
        vec![(1, "loaded"), (2, "loaded"), (3, "loaded"), (4, "loaded")]
    );
    Ok(())
}

#[tokio::test]
async fn test_transform_curry_function() -> anyhow::Result<()> {
    // Arrange
    let load_two_at_a_time = Transform::new(Concurrency::limited(2)?).with(load);

    // Act
    let values = collect_values(load_two_at_a_time.apply_once(from_values(1..=4))).await;

    // Assert
    assert_eq!(values.len(), 4);
    assert_eq!(values[3], (4, "loaded"));
    Ok(())
}

#[tokio::test]
async fn test_transform_all_forms_agree() -> anyhow::Result<()> {
    // Arrange
    let limit = Concurrency::limited(3)?;
    let work = |n: usize| delay_ticks(n % 4, n * 2);
    let input = || from_values(vec![5, 1, 7, 2, 8, 3]);

    // Act
    let direct = collect_values(transform(limit, work, input())).await;
    let method = collect_values(input().transform(limit, work)).await;
    let curried = collect_values(Transform::new(limit).with(work).apply(input())).await;
    let converted = collect_values(Transform::from(limit).with(work).apply_once(input())).await;

    // Assert
    assert_eq!(direct, method);
    assert_eq!(direct, curried);
    assert_eq!(direct, converted);
    Ok(())
}

#[tokio::test]
async fn test_transform_partial_application_is_reusable() {
    // Arrange
    let double = Transform::unbounded().with(|n: i32| ready(n * 2));

    // Act
    let first = collect_values(double.apply(from_values([1, 2]))).await;
    let second = collect_values(double.apply(from_values([10]))).await;

    // Assert
    assert!(double.limit().is_unbounded());
    assert_eq!(first, vec![2, 4]);
    assert_eq!(second, vec![20]);
}

#[tokio::test]
async fn test_try_transform_curry() -> anyhow::Result<()> {
    // Arrange
    let parse = Transform::try_new(2)?.try_with(|s: &'static str| ready(s.parse::<i32>()));

    // Act
    let values = collect_values(parse.apply(from_values(["1", "2", "3"]))).await;

    // Assert
    assert_eq!(values, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn test_filter_is_curryable() {
    // Arrange
    let filter_missing = Filter::new(|n: &Option<i32>| ready(n.is_some()));
    let values = from_stream(stream::iter(vec![Some(1), Some(2), None, Some(3)]));

    // Act
    let numbers = collect_values(filter_missing.apply(values)).await;

    // Assert
    assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
}

#[tokio::test]
async fn test_filter_all_forms_agree() {
    // Arrange
    let odd = |n: &u8| ready(n % 2 == 1);
    let input = || from_values(0..20u8);

    // Act
    let direct = collect_values(filter(odd, input())).await;
    let method = collect_values(input().filter_with(odd)).await;
    let curried = collect_values(Filter::new(odd).apply(input())).await;
    let consumed = collect_values(Filter::new(odd).apply_once(input())).await;

    // Assert
    assert_eq!(direct, vec![1, 3, 5, 7, 9, 11, 13, 15, 17, 19]);
    assert_eq!(direct, method);
    assert_eq!(direct, curried);
    assert_eq!(direct, consumed);
}

#[tokio::test]
async fn test_try_filter_curry() {
    // Arrange
    let non_empty = TryFilter::new(|s: &String| {
        ready(if s.len() > 5 {
            Err(io::Error::other("too long"))
        } else {
            Ok(!s.is_empty())
        })
    });

    // Act
    let kept = collect_values(non_empty.apply(from_values(vec![
        "a".to_string(),
        String::new(),
        "b".to_string(),
    ])))
    .await;

    // Assert
    assert_eq!(kept, vec!["a".to_string(), "b".to_string()]);
}
