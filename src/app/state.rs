//! App state - pure data structure with no I/O logic

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::messages::RenderState;
use crate::models::{EndpointKey, FetchRecord};
use crate::network::client::ApiError;

/// Fetch state of every dashboard card.
///
/// All transitions are keyed by [`EndpointKey`] and touch only that key's
/// record.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    records: [FetchRecord; 4],
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// Every key loading, nothing received
    pub fn new() -> Self {
        DashboardState {
            records: std::array::from_fn(|_| FetchRecord::loading()),
        }
    }

    pub fn record(&self, key: EndpointKey) -> &FetchRecord {
        &self.records[key.index()]
    }

    /// Records in card order
    pub fn iter(&self) -> impl Iterator<Item = (EndpointKey, &FetchRecord)> {
        EndpointKey::ALL.into_iter().zip(self.records.iter())
    }

    /// Return every key to its initial state
    pub fn reset(&mut self) {
        for key in EndpointKey::ALL {
            self.reset_key(key);
        }
    }

    pub fn reset_key(&mut self, key: EndpointKey) {
        self.records[key.index()] = FetchRecord::loading();
    }

    pub fn apply(&mut self, key: EndpointKey, outcome: Result<Value, ApiError>) {
        match outcome {
            Ok(value) => self.apply_success(key, value),
            Err(e) => self.apply_failure(key, &e),
        }
    }

    /// Store the payload. An error already present is left as is.
    pub fn apply_success(&mut self, key: EndpointKey, value: Value) {
        let record = &mut self.records[key.index()];
        record.payload = Some(value);
        record.is_loading = false;
        record.settled_at = Some(Utc::now());
    }

    /// Store the error message. The payload is not cleared.
    pub fn apply_failure(&mut self, key: EndpointKey, error: &ApiError) {
        let message = error.to_string();
        let message = if message.trim().is_empty() {
            key.fallback_error().to_string()
        } else {
            message
        };
        let record = &mut self.records[key.index()];
        record.error = Some(message);
        record.is_loading = false;
        record.settled_at = Some(Utc::now());
    }

    /// Duration of the attempt that settled this key
    pub fn record_elapsed(&mut self, key: EndpointKey, elapsed_ms: u64) {
        self.records[key.index()].elapsed_ms = Some(elapsed_ms);
    }

    pub fn loading_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_loading).count()
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub dashboard: DashboardState,

    /// Request id whose settlement each key is waiting for
    pub pending: HashMap<EndpointKey, u64>,
    pub next_request_id: u64,

    // UI state
    pub selected: EndpointKey,
    pub scroll: [u16; 4],
    pub show_help: bool,

    pub base_url: String,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        AppState {
            dashboard: DashboardState::new(),
            pending: HashMap::new(),
            next_request_id: 1,
            selected: EndpointKey::Hello,
            scroll: [0; 4],
            show_help: false,
            base_url: base_url.into(),
            last_refresh: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            dashboard: self.dashboard.clone(),
            selected: self.selected,
            scroll: self.scroll,
            show_help: self.show_help,
            base_url: self.base_url.clone(),
            last_refresh: self.last_refresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_records_are_loading() {
        let state = DashboardState::new();
        for (_, record) in state.iter() {
            assert_eq!(record.payload, None);
            assert!(record.is_loading);
            assert_eq!(record.error, None);
        }
        assert_eq!(state.loading_count(), 4);
    }

    #[test]
    fn test_success_sets_payload() {
        let mut state = DashboardState::new();
        state.apply(EndpointKey::Data, Ok(json!([1, 2, 3])));

        let record = state.record(EndpointKey::Data);
        assert_eq!(record.payload, Some(json!([1, 2, 3])));
        assert!(!record.is_loading);
        assert_eq!(record.error, None);
        assert!(record.settled_at.is_some());
    }

    #[test]
    fn test_failure_keeps_earlier_payload() {
        let mut state = DashboardState::new();
        state.apply_success(EndpointKey::User, json!({"name": "ada"}));
        state.apply(EndpointKey::User, Err(ApiError::Http { status: 503 }));

        let record = state.record(EndpointKey::User);
        assert_eq!(record.payload, Some(json!({"name": "ada"})));
        assert_eq!(record.error.as_deref(), Some("Request failed with status code 503"));
        assert!(!record.is_loading);
    }

    #[test]
    fn test_empty_failure_message_falls_back() {
        let mut state = DashboardState::new();
        state.apply(EndpointKey::Health, Err(ApiError::Transport(String::new())));
        assert_eq!(
            state.record(EndpointKey::Health).error.as_deref(),
            Some("Failed to fetch health data")
        );
    }

    #[test]
    fn test_transitions_are_isolated() {
        for key in EndpointKey::ALL {
            let mut state = DashboardState::new();
            state.apply_success(key, json!("ok"));
            for other in EndpointKey::ALL.into_iter().filter(|k| *k != key) {
                assert_eq!(state.record(other), &FetchRecord::loading());
            }

            let mut state = DashboardState::new();
            state.apply_failure(key, &ApiError::Transport("down".into()));
            for other in EndpointKey::ALL.into_iter().filter(|k| *k != key) {
                assert_eq!(state.record(other), &FetchRecord::loading());
            }
        }
    }

    #[test]
    fn test_reset_returns_everything_to_loading() {
        let mut state = DashboardState::new();
        state.apply_success(EndpointKey::Hello, json!({"message": "hello"}));
        state.apply_failure(EndpointKey::Health, &ApiError::Http { status: 502 });
        state.apply_success(EndpointKey::Data, json!(null));

        state.reset();
        assert_eq!(state, DashboardState::new());
    }

    #[test]
    fn test_reset_key_touches_one_record() {
        let mut state = DashboardState::new();
        state.apply_success(EndpointKey::Hello, json!(1));
        state.apply_success(EndpointKey::User, json!(2));

        state.reset_key(EndpointKey::User);
        assert_eq!(state.record(EndpointKey::User), &FetchRecord::loading());
        assert_eq!(state.record(EndpointKey::Hello).payload, Some(json!(1)));
    }
}
