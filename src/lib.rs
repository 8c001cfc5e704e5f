//! # apidash
//!
//! A terminal dashboard that fetches four backend endpoints and shows each
//! one as a card with its loading, error or success state.
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (per-endpoint fetch state)
//! - Network Layer (Tokio runtime, one task per fetch)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use models::{EndpointKey, FetchRecord, FetchStatus};
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, DashboardState};
pub use network::{ApiClient, ApiError, NetworkActor};
