// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by the laneflow operators: the [`StreamItem`] carried by
//! every stream, the [`LaneflowError`] hierarchy, [`Concurrency`] limits and the
//! pull-based [`Source`] adapter with its push-based variant.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod concurrency;
pub mod error;
pub mod push_source;
pub mod source;
pub mod stream_item;

pub use self::concurrency::Concurrency;
pub use self::error::{IntoLaneflowError, LaneflowError, Result, ResultExt};
pub use self::push_source::{push_source, PushSource, Pusher};
pub use self::source::{from_stream, from_try_stream, from_values, IntoSource, Source};
pub use self::stream_item::StreamItem;
