// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live activity log view.
//!
//! A [`LiveView`] owns one task that listens to the store subscription and a
//! refresh timer, and publishes a [`ViewFrame`] after every snapshot and
//! every tick:
//!
//! ```text
//! Unsubscribed -> Loading -> Rendered <-> Error -> Unsubscribed
//! ```
//!
//! All view state lives inside that task. Each snapshot replaces the
//! timeline wholesale and restarts the refresh timer.

use crate::db::{ActivityStore, Snapshot, Subscription};
use crate::models::ViewFrame;
use crate::services::normalizer::normalize_all;
use crate::services::timeline::Timeline;
use chrono::{FixedOffset, Utc};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Settings for a live view.
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    pub display_offset: FixedOffset,
    /// Elapsed-time refresh period
    pub refresh_interval: Duration,
}

/// Handle to a running live view. Dropping it tears the view down.
pub struct LiveView {
    frames: watch::Receiver<ViewFrame>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl LiveView {
    /// Subscribe to `store` and start rendering.
    pub fn start(store: &ActivityStore, settings: ViewSettings) -> Self {
        let (frames_tx, frames) = watch::channel(ViewFrame::Loading);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let subscription = store.subscribe();

        let task = tokio::spawn(drive(subscription, frames_tx, shutdown_rx, settings));

        Self {
            frames,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Receiver for frame updates.
    pub fn frames(&self) -> watch::Receiver<ViewFrame> {
        self.frames.clone()
    }

    /// The most recently published frame.
    pub fn current(&self) -> ViewFrame {
        self.frames.borrow().clone()
    }

    /// Tear down and wait for the view task to finish.
    pub async fn stop(mut self) -> ViewFrame {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Live view task ended abnormally");
            }
        }
        self.current()
    }
}

impl Drop for LiveView {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// State owned by the view task.
struct ViewState {
    settings: ViewSettings,
    timeline: Option<Timeline>,
    refresh: Option<Interval>,
}

impl ViewState {
    fn new(settings: ViewSettings) -> Self {
        Self {
            settings,
            timeline: None,
            refresh: None,
        }
    }

    fn apply_snapshot(&mut self, snapshot: &Snapshot) -> ViewFrame {
        let records = normalize_all(&snapshot.activities, &self.settings.display_offset);
        self.timeline = Some(Timeline::build(&records, &self.settings.display_offset));

        // Replace, never stack, the refresh timer.
        let period = self.settings.refresh_interval;
        let mut refresh = tokio::time::interval_at(Instant::now() + period, period);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.refresh = Some(refresh);

        tracing::debug!(activities = snapshot.len(), "Live view re-rendered");
        self.frame()
    }

    fn apply_error(&mut self) -> ViewFrame {
        self.timeline = None;
        self.refresh = None;
        ViewFrame::load_error()
    }

    fn frame(&self) -> ViewFrame {
        match &self.timeline {
            Some(timeline) => ViewFrame::Rendered(timeline.render(Utc::now())),
            None => ViewFrame::Loading,
        }
    }

    async fn next_tick(&mut self) {
        match self.refresh.as_mut() {
            Some(refresh) => {
                refresh.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

async fn drive(
    mut subscription: Subscription,
    frames: watch::Sender<ViewFrame>,
    mut shutdown: oneshot::Receiver<()>,
    settings: ViewSettings,
) {
    let mut state = ViewState::new(settings);

    loop {
        let frame = tokio::select! {
            _ = &mut shutdown => break,
            update = subscription.next() => match update {
                Some(Ok(snapshot)) => state.apply_snapshot(&snapshot),
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Error loading activity log");
                    state.apply_error()
                }
                None => break,
            },
            _ = state.next_tick() => state.frame(),
        };

        if frames.send(frame).is_err() {
            break;
        }
    }

    drop(subscription);
    state.refresh = None;
    let _ = frames.send(ViewFrame::Unsubscribed);
    tracing::debug!("Live view unsubscribed");
}
