//! Network layer - backend API client and fetch execution
//!
//! The Network actor receives fetch commands and sends back settlements.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{ApiClient, ApiError};
