// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live booking notifications.
//!
//! Downstream consumers (payment capture, mailers, operator screens) learn
//! about finished regeneration runs and new maintenance blocks over a
//! WebSocket. Events are informational only; consumers fetch the week's
//! reservations over HTTP for authoritative data.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Events held for slow subscribers before the oldest are dropped.
const BOOKING_EVENT_BACKLOG: usize = 100;

/// Live booking events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A regeneration run completed and its batch is persisted.
    WeekRegenerated {
        /// First day of the week (ISO 8601).
        week_start: String,
        /// Last day of the week (ISO 8601).
        week_end: String,
        /// Previous team bookings removed.
        deleted: usize,
        /// Reservations created.
        count: usize,
    },
    /// A venue slot was blocked for maintenance.
    MaintenanceBlocked {
        /// The blocked venue.
        venue_id: i64,
        /// The blocked date (ISO 8601).
        date: String,
        /// The blocked slot label.
        slot: String,
    },
    /// First message on every new subscription.
    Connected {
        /// Time the subscription started (ISO 8601).
        timestamp: String,
    },
}

/// Fan-out of live events to every connected client.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a broadcaster with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(BOOKING_EVENT_BACKLOG);
        Self { tx }
    }

    /// Sends `event` to every current subscriber.
    ///
    /// Events sent while nobody listens are dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, subscribers = count, "Published booking event");
            }
            Err(_) => {
                debug!(?event, "Booking event dropped, no subscribers");
            }
        }
    }

    /// Subscribes to events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades the connection to a WebSocket that streams live events.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| stream_booking_events(socket, broadcaster))
}

async fn stream_booking_events(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Booking event subscriber connected");

    let (mut outgoing, mut incoming) = socket.split();
    let mut events: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let greeting: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&greeting)
        && outgoing.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Subscriber left before the greeting was sent");
        return;
    }

    let mut forward_events = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if outgoing.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Booking event could not be encoded");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber fell behind, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Clients only listen; anything they send is ignored.
    let mut drain_socket = tokio::spawn(async move {
        while let Some(msg) = incoming.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    debug!("Ignoring message from subscriber");
                }
                Ok(Message::Close(_)) => {
                    debug!("Subscriber closed the socket");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    warn!(?e, "Subscriber socket failed");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut forward_events => {
            drain_socket.abort();
        }
        _ = &mut drain_socket => {
            forward_events.abort();
        }
    }

    info!("Booking event subscriber disconnected");
}
