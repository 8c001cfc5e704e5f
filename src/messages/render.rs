//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Utc};

use crate::app::state::DashboardState;
use crate::constants::DEFAULT_API_URL;
use crate::models::EndpointKey;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub dashboard: DashboardState,

    // UI state
    pub selected: EndpointKey,
    pub scroll: [u16; 4],
    pub show_help: bool,

    pub base_url: String,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl RenderState {
    pub fn scroll_for(&self, key: EndpointKey) -> u16 {
        self.scroll[key.index()]
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            dashboard: DashboardState::new(),
            selected: EndpointKey::Hello,
            scroll: [0; 4],
            show_help: false,
            base_url: String::from(DEFAULT_API_URL),
            last_refresh: None,
        }
    }
}
