// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity_log;
pub mod elapsed;
pub mod live_view;
pub mod normalizer;
pub mod timeline;

pub use activity_log::ActivityLogService;
pub use live_view::{LiveView, ViewSettings};
pub use timeline::Timeline;
