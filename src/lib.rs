// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Baby Tracker: log feeds and naps, see how long it has been.
//!
//! This crate provides the backend API that records activities in Firestore
//! and renders them back as a day-grouped log with nap durations and
//! elapsed-time displays, either on request or as a live stream.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::ActivityStore;
use services::ActivityLogService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: ActivityStore,
    pub activity_log: ActivityLogService,
}
