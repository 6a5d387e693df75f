//! State-change event delivery

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, trace};

use super::ports::{EventError, EventSink};
use crate::domain::recording::{RecorderState, StateChangeEvent};

/// Event name the host uses for recorder state notifications
pub const STATE_CHANGED_EVENT: &str = "state_changed";

/// Callback invoked for each state-change notification
pub type StateCallback = Arc<dyn Fn(StateChangeEvent) + Send + Sync>;

/// Decodes `state_changed` notifications and forwards them to the registered
/// callback, one call per event, without buffering.
pub struct StateEvents {
    control_id: u64,
    callback: RwLock<Option<StateCallback>>,
    last_state: RwLock<Option<RecorderState>>,
}

impl StateEvents {
    pub fn new(control_id: u64) -> Self {
        Self {
            control_id,
            callback: RwLock::new(None),
            last_state: RwLock::new(None),
        }
    }

    /// Register the callback, replacing any previous one
    pub fn set_callback(&self, callback: Option<StateCallback>) {
        *self.callback.write() = callback;
    }

    /// Check if a callback is registered
    pub fn has_callback(&self) -> bool {
        self.callback.read().is_some()
    }

    /// State from the most recent notification, if any arrived
    pub fn last_state(&self) -> Option<RecorderState> {
        *self.last_state.read()
    }

    fn decode(payload: &Value) -> Result<(RecorderState, String), EventError> {
        let raw = payload.as_str().ok_or_else(|| EventError::Decode {
            event: STATE_CHANGED_EVENT.to_string(),
            message: format!("expected a state string, got {}", payload),
        })?;
        let state = raw.parse::<RecorderState>().map_err(|e| EventError::Decode {
            event: STATE_CHANGED_EVENT.to_string(),
            message: e.to_string(),
        })?;
        Ok((state, raw.to_string()))
    }
}

impl EventSink for StateEvents {
    fn on_event(&self, name: &str, payload: &Value) -> Result<(), EventError> {
        if name != STATE_CHANGED_EVENT {
            trace!(event = name, "ignoring unrelated host event");
            return Ok(());
        }

        let (state, data) = Self::decode(payload)?;
        *self.last_state.write() = Some(state);
        debug!(control_id = self.control_id, %state, "recorder state changed");

        // Clone out of the lock so the callback may re-register itself
        let callback = self.callback.read().clone();
        match callback {
            Some(callback) => callback(StateChangeEvent {
                control_id: self.control_id,
                state,
                data,
            }),
            None => trace!("no state callback registered, event discarded"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    fn recording_events() -> (StateEvents, Arc<Mutex<Vec<StateChangeEvent>>>) {
        let events = StateEvents::new(7);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        events.set_callback(Some(Arc::new(move |event| sink.lock().push(event))));
        (events, seen)
    }

    #[test]
    fn delivers_in_order() {
        let (events, seen) = recording_events();

        for raw in ["recording", "paused", "stopped"] {
            events.on_event(STATE_CHANGED_EVENT, &json!(raw)).unwrap();
        }

        let seen = seen.lock();
        let states: Vec<_> = seen.iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![
                RecorderState::Recording,
                RecorderState::Paused,
                RecorderState::Stopped
            ]
        );
        assert!(seen.iter().all(|e| e.control_id == 7));
        assert_eq!(seen[1].data, "paused");
    }

    #[test]
    fn without_callback_updates_last_state_only() {
        let events = StateEvents::new(1);
        assert!(!events.has_callback());
        events.on_event(STATE_CHANGED_EVENT, &json!("recording")).unwrap();
        assert_eq!(events.last_state(), Some(RecorderState::Recording));
    }

    #[test]
    fn unknown_state_fails_loudly() {
        let (events, seen) = recording_events();
        let err = events
            .on_event(STATE_CHANGED_EVENT, &json!("exploded"))
            .unwrap_err();
        assert!(err.to_string().contains("exploded"));
        assert!(seen.lock().is_empty());
        assert_eq!(events.last_state(), None);
    }

    #[test]
    fn non_string_payload_fails() {
        let events = StateEvents::new(1);
        assert!(events.on_event(STATE_CHANGED_EVENT, &json!(3)).is_err());
    }

    #[test]
    fn unrelated_events_ignored() {
        let (events, seen) = recording_events();
        events.on_event("amplitude", &json!(0.4)).unwrap();
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn cleared_callback_stops_delivery() {
        let (events, seen) = recording_events();
        events.on_event(STATE_CHANGED_EVENT, &json!("recording")).unwrap();
        events.set_callback(None);
        events.on_event(STATE_CHANGED_EVENT, &json!("stopped")).unwrap();
        assert_eq!(seen.lock().len(), 1);
    }
}
