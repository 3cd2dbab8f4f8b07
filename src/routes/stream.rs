// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live activity log over Server-Sent Events.

use crate::AppState;
use async_stream::stream;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/activities/stream", get(stream_activities))
}

/// Stream view frames: one per snapshot and one per elapsed-time refresh.
///
/// Each connection gets its own live view; it is torn down when the client
/// disconnects and the stream is dropped.
async fn stream_activities(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let view = state.activity_log.live_view();
    let mut frames = view.frames();
    tracing::debug!("Live view client connected");

    let stream = stream! {
        let _view = view;
        loop {
            let frame = frames.borrow_and_update().clone();
            match Event::default().event(frame.state_name()).json_data(&frame) {
                Ok(event) => yield Ok::<Event, Infallible>(event),
                Err(e) => tracing::warn!(error = %e, "Failed to encode view frame"),
            }
            if frames.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
}
