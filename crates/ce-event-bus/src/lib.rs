//! Event bus with typed pub/sub for the countries explorer
//!
//! The selection manager, the comparison panel and the list page publish
//! their changes here; the terminal session subscribes to report
//! transitions that happen off the input path (the panel's delayed clear).

use ce_core::{Event, EventData, EventType};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

/// Events travel with a JSON payload and are decoded by typed receivers
pub type RawEvent = Event<serde_json::Value>;

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Broadcast channels keyed by event type, plus one that sees everything
pub struct EventBus {
    channels: DashMap<EventType, broadcast::Sender<RawEvent>>,
    everything: broadcast::Sender<RawEvent>,
    capacity: usize,
}

impl EventBus {
    /// Bus whose channels queue up to 256 events per receiver
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// A slow receiver misses events once `capacity` are queued for it
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            everything: broadcast::channel(capacity).0,
            capacity,
        }
    }

    /// Receive events of one type, or all of them for [`EventType::match_all`]
    pub fn subscribe(&self, event_type: impl Into<EventType>) -> broadcast::Receiver<RawEvent> {
        let event_type = event_type.into();
        if event_type.is_match_all() {
            return self.subscribe_all();
        }

        trace!(%event_type, "New subscription");
        self.channels
            .entry(event_type)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Receive events of type `T::event_type()`, decoded into `T`
    pub fn subscribe_typed<T: EventData + DeserializeOwned>(&self) -> TypedEventReceiver<T> {
        TypedEventReceiver {
            rx: self.subscribe(T::event_type()),
            _data: PhantomData,
        }
    }

    /// Receive every event fired on this bus, whatever its type
    pub fn subscribe_all(&self) -> broadcast::Receiver<RawEvent> {
        self.everything.subscribe()
    }

    /// Publish `event` to subscribers of its type and to [`Self::subscribe_all`]
    /// receivers
    ///
    /// Events fired while nobody listens are dropped.
    pub fn fire(&self, event: RawEvent) {
        debug!(event_type = %event.event_type, "Firing event");

        // A send error only means nobody is listening
        if let Some(channel) = self.channels.get(&event.event_type) {
            let _ = channel.send(event.clone());
        }
        let _ = self.everything.send(event);
    }

    /// Serialize `data` and fire it under `T::event_type()`
    pub fn fire_typed<T: EventData + Serialize>(&self, data: T) {
        let data = match serde_json::to_value(&data) {
            Ok(data) => data,
            Err(e) => {
                warn!(event_type = T::event_type(), error = %e, "Dropping unserializable event");
                return;
            }
        };
        self.fire(Event::new(T::event_type(), data));
    }

    /// Number of event types with a channel
    pub fn listener_count(&self) -> usize {
        self.channels.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver that decodes payloads into `T`
///
/// Payloads that do not decode are skipped.
pub struct TypedEventReceiver<T> {
    rx: broadcast::Receiver<RawEvent>,
    _data: PhantomData<T>,
}

impl<T: EventData + DeserializeOwned> TypedEventReceiver<T> {
    pub async fn recv(&mut self) -> Result<Event<T>, broadcast::error::RecvError> {
        loop {
            if let Some(event) = decode(self.rx.recv().await?) {
                return Ok(event);
            }
        }
    }

    /// Take an already queued event without waiting
    pub fn try_recv(&mut self) -> Result<Event<T>, broadcast::error::TryRecvError> {
        loop {
            if let Some(event) = decode(self.rx.try_recv()?) {
                return Ok(event);
            }
        }
    }
}

fn decode<T: DeserializeOwned>(event: RawEvent) -> Option<Event<T>> {
    match serde_json::from_value(event.data) {
        Ok(data) => Some(Event {
            event_type: event.event_type,
            data,
            time_fired: event.time_fired,
        }),
        Err(e) => {
            trace!(event_type = %event.event_type, error = %e, "Skipping undecodable event");
            None
        }
    }
}
