// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-to-pull bridge for producers that emit independently of the consumer.
//!
//! A producer holds one or more [`Pusher`] handles and calls
//! [`push`](Pusher::push), [`error`](Pusher::error) or [`end`](Pusher::end)
//! whenever it likes. The consumer side is a [`PushSource`] wrapped in a
//! [`Source`], which drains everything pushed so far, oldest first, and
//! suspends when the buffer is empty and the stream has not ended.
//!
//! # Example
//!
//! ```rust
//! use laneflow_core::push_source::push_source;
//!
//! # futures::executor::block_on(async {
//! let (pusher, mut source) = push_source();
//!
//! // Buffered before anyone pulls
//! pusher.push("a").unwrap();
//! pusher.push("b").unwrap();
//! pusher.end();
//!
//! assert_eq!(source.advance().await.unwrap().unwrap(), "a");
//! assert_eq!(source.advance().await.unwrap().unwrap(), "b");
//! assert!(source.advance().await.is_none());
//! # });
//! ```

use crate::error::{LaneflowError, Result};
use crate::source::Source;
use crate::stream_item::StreamItem;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use futures::stream::FusedStream;
use futures::Stream;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

struct Shared<T> {
    buffer: VecDeque<StreamItem<T>>,
    ended: bool,
    // Single pending-request slot: only one consumer pulls at a time
    waker: Option<Waker>,
    pushers: usize,
    receiver_alive: bool,
}

impl<T> Shared<T> {
    fn wake(&mut self) {
        if let Some(waker) = self.waker.take() {
            waker.wake();
        }
    }

    fn enqueue(&mut self, item: StreamItem<T>) -> Result<()> {
        if self.ended || !self.receiver_alive {
            return Err(LaneflowError::SourceClosed);
        }
        self.buffer.push_back(item);
        self.wake();
        Ok(())
    }

    fn finish(&mut self) {
        if !self.ended {
            self.ended = true;
            self.wake();
        }
    }
}

/// Creates a push-based source and the handle that feeds it.
///
/// The stream ends when [`Pusher::end`] or [`Pusher::error`] is called, or
/// when every `Pusher` clone has been dropped.
pub fn push_source<T>() -> (Pusher<T>, Source<PushSource<T>>) {
    let shared = Arc::new(Mutex::new(Shared {
        buffer: VecDeque::new(),
        ended: false,
        waker: None,
        pushers: 1,
        receiver_alive: true,
    }));

    (
        Pusher {
            shared: Arc::clone(&shared),
        },
        Source::new(PushSource { shared }),
    )
}

/// Producer handle of a [`push_source`].
pub struct Pusher<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T> Pusher<T> {
    /// Pushes a value, waking the consumer if it is waiting.
    ///
    /// # Errors
    ///
    /// Returns [`LaneflowError::SourceClosed`] if the stream has already ended
    /// or its consumer is gone.
    pub fn push(&self, value: T) -> Result<()> {
        self.send(StreamItem::Value(value))
    }

    /// Pushes a terminal failure and ends the stream.
    ///
    /// Values pushed earlier are still delivered before the error.
    ///
    /// # Errors
    ///
    /// Returns [`LaneflowError::SourceClosed`] if the stream has already ended
    /// or its consumer is gone.
    pub fn error(&self, error: LaneflowError) -> Result<()> {
        let mut shared = self.shared.lock();
        shared.enqueue(StreamItem::Error(error))?;
        shared.finish();
        Ok(())
    }

    /// Ends the stream. Idempotent.
    pub fn end(&self) {
        self.shared.lock().finish();
    }

    /// `true` once the stream has ended or failed.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.shared.lock().ended
    }

    /// Number of items pushed but not yet pulled.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.shared.lock().buffer.len()
    }

    fn send(&self, item: StreamItem<T>) -> Result<()> {
        self.shared.lock().enqueue(item)
    }
}

impl<T> Clone for Pusher<T> {
    fn clone(&self) -> Self {
        self.shared.lock().pushers += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for Pusher<T> {
    fn drop(&mut self) {
        let mut shared = self.shared.lock();
        shared.pushers -= 1;
        if shared.pushers == 0 {
            shared.finish();
        }
    }
}

impl<T> core::fmt::Debug for Pusher<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("Pusher")
            .field("buffered", &shared.buffer.len())
            .field("ended", &shared.ended)
            .finish()
    }
}

/// Consumer side of a [`push_source`].
pub struct PushSource<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T> Stream for PushSource<T> {
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut shared = self.shared.lock();

        if let Some(item) = shared.buffer.pop_front() {
            return Poll::Ready(Some(item));
        }
        if shared.ended {
            return Poll::Ready(None);
        }

        match &mut shared.waker {
            Some(waker) if waker.will_wake(cx.waker()) => {}
            slot => *slot = Some(cx.waker().clone()),
        }
        Poll::Pending
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let shared = self.shared.lock();
        let buffered = shared.buffer.len();
        if shared.ended {
            (buffered, Some(buffered))
        } else {
            (buffered, None)
        }
    }
}

impl<T> FusedStream for PushSource<T> {
    fn is_terminated(&self) -> bool {
        let shared = self.shared.lock();
        shared.ended && shared.buffer.is_empty()
    }
}

impl<T> Drop for PushSource<T> {
    fn drop(&mut self) {
        let mut shared = self.shared.lock();
        shared.receiver_alive = false;
        shared.buffer.clear();
    }
}

impl<T> core::fmt::Debug for PushSource<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PushSource").finish_non_exhaustive()
    }
}
