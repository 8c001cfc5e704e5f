//! Command handlers - business logic for processing UI events

use chrono::Utc;

use crate::app::AppState;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{EndpointKey, FetchStatus};
use crate::ui::format_payload;

impl AppState {
    // ========================
    // Fetching
    // ========================

    /// Reset every card and issue a fetch for each key
    pub fn refresh_all(&mut self) -> Vec<NetworkCommand> {
        self.dashboard.reset();
        self.scroll = [0; 4];
        self.last_refresh = Some(Utc::now());
        EndpointKey::ALL
            .into_iter()
            .map(|key| self.issue_fetch(key))
            .collect()
    }

    /// Reset and re-fetch the selected card only
    pub fn refresh_selected(&mut self) -> NetworkCommand {
        let key = self.selected;
        self.dashboard.reset_key(key);
        self.scroll[key.index()] = 0;
        self.issue_fetch(key)
    }

    fn issue_fetch(&mut self, key: EndpointKey) -> NetworkCommand {
        let id = self.next_id();
        // Any earlier attempt for this key is superseded
        self.pending.insert(key, id);
        NetworkCommand::Fetch { id, key }
    }

    /// Apply a settlement, ignoring ones for superseded attempts
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let key = response.key();
        let id = response.id();

        if self.pending.get(&key) != Some(&id) {
            tracing::debug!(id, endpoint = key.as_str(), "Discarding stale settlement");
            return;
        }
        self.pending.remove(&key);

        match response {
            NetworkResponse::Settled { outcome, time_ms, .. } => {
                self.dashboard.apply(key, outcome);
                self.dashboard.record_elapsed(key, time_ms);
            }
        }
    }

    // ========================
    // Navigation
    // ========================

    pub fn next_card(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn prev_card(&mut self) {
        self.selected = self.selected.prev();
    }

    pub fn scroll_up(&mut self) {
        let scroll = &mut self.scroll[self.selected.index()];
        *scroll = scroll.saturating_sub(1);
    }

    /// Scrolls no further than the last line of the card's payload
    pub fn scroll_down(&mut self) {
        let max = self.max_scroll(self.selected);
        let scroll = &mut self.scroll[self.selected.index()];
        *scroll = scroll.saturating_add(1).min(max);
    }

    fn max_scroll(&self, key: EndpointKey) -> u16 {
        match self.dashboard.record(key).status() {
            FetchStatus::Success(payload) => {
                let lines = format_payload(payload).lines().count();
                u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
            }
            FetchStatus::Loading | FetchStatus::Failed(_) => 0,
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
