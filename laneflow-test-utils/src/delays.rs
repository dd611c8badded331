// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Simulated asynchronous work.

use std::time::Duration;

/// Resolves to `value` after yielding to the scheduler `ticks` times.
///
/// Each tick is one round trip through the executor, so a task that waits
/// more ticks settles later than one started at the same time with fewer.
pub async fn delay_ticks<T>(ticks: usize, value: T) -> T {
    for _ in 0..ticks {
        tokio::task::yield_now().await;
    }
    value
}

/// Resolves to `value` after `millis` milliseconds.
///
/// Meant for tests running on a paused clock (`#[tokio::test(start_paused = true)]`),
/// where time advances only when every task is idle and latencies are exact.
pub async fn latency<T>(millis: u64, value: T) -> T {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    value
}
