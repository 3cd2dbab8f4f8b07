// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod view;

pub use activity::{ActivityKind, ActivityRecord, StoredActivity};
pub use view::{EntryView, RenderedLog, TimelineItem, ViewFrame};
