use chrono::{DateTime, Utc};
use serde_json::Value;

/// Backend endpoint shown as a dashboard card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndpointKey {
    Hello,
    Health,
    Data,
    User,
}

impl EndpointKey {
    /// All keys, in card order
    pub const ALL: [EndpointKey; 4] = [
        EndpointKey::Hello,
        EndpointKey::Health,
        EndpointKey::Data,
        EndpointKey::User,
    ];

    pub fn index(&self) -> usize {
        match self {
            EndpointKey::Hello => 0,
            EndpointKey::Health => 1,
            EndpointKey::Data => 2,
            EndpointKey::User => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKey::Hello => "hello",
            EndpointKey::Health => "health",
            EndpointKey::Data => "data",
            EndpointKey::User => "user",
        }
    }

    /// Path suffix appended to the API base
    pub fn path(&self) -> &'static str {
        match self {
            EndpointKey::Hello => "/hello",
            EndpointKey::Health => "/health",
            EndpointKey::Data => "/data",
            EndpointKey::User => "/user",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EndpointKey::Hello => "Hello Endpoint",
            EndpointKey::Health => "Health Check",
            EndpointKey::Data => "Data Endpoint",
            EndpointKey::User => "User Endpoint",
        }
    }

    /// Name of the client operation serving this key
    pub fn operation(&self) -> &'static str {
        match self {
            EndpointKey::Hello => "get_hello",
            EndpointKey::Health => "check_health",
            EndpointKey::Data => "fetch_data",
            EndpointKey::User => "get_user",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EndpointKey::Hello => "🖥",
            EndpointKey::Health => "♥",
            EndpointKey::Data => "🗄",
            EndpointKey::User => "👤",
        }
    }

    /// Message stored when a failure carries no message of its own
    pub fn fallback_error(&self) -> &'static str {
        match self {
            EndpointKey::Hello => "Failed to fetch hello data",
            EndpointKey::Health => "Failed to fetch health data",
            EndpointKey::Data => "Failed to fetch data",
            EndpointKey::User => "Failed to fetch user data",
        }
    }

    pub fn next(&self) -> EndpointKey {
        EndpointKey::ALL[(self.index() + 1) % EndpointKey::ALL.len()]
    }

    pub fn prev(&self) -> EndpointKey {
        let len = EndpointKey::ALL.len();
        EndpointKey::ALL[(self.index() + len - 1) % len]
    }
}

/// Per-endpoint fetch state.
///
/// The three fields are written independently: a failure does not clear a
/// payload stored by an earlier success.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRecord {
    pub payload: Option<Value>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// When the last fetch for this key settled
    pub settled_at: Option<DateTime<Utc>>,
    /// How long the last fetch took
    pub elapsed_ms: Option<u64>,
}

impl FetchRecord {
    /// Initial record: nothing received yet, fetch in flight
    pub fn loading() -> Self {
        FetchRecord {
            payload: None,
            is_loading: true,
            error: None,
            settled_at: None,
            elapsed_ms: None,
        }
    }

    pub fn status(&self) -> FetchStatus<'_> {
        if self.is_loading {
            FetchStatus::Loading
        } else if let Some(message) = &self.error {
            FetchStatus::Failed(message)
        } else {
            FetchStatus::Success(self.payload.as_ref())
        }
    }
}

impl Default for FetchRecord {
    fn default() -> Self {
        Self::loading()
    }
}

/// What a card shows, derived from its record
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FetchStatus<'a> {
    Loading,
    Failed(&'a str),
    Success(Option<&'a Value>),
}

impl FetchStatus<'_> {
    /// Badge label
    pub fn label(&self) -> &'static str {
        match self {
            FetchStatus::Loading => "Loading",
            FetchStatus::Failed(_) => "Error",
            FetchStatus::Success(_) => "Success",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_match_keys() {
        let paths: Vec<&str> = EndpointKey::ALL.iter().map(|k| k.path()).collect();
        assert_eq!(paths, vec!["/hello", "/health", "/data", "/user"]);
        for key in EndpointKey::ALL {
            assert_eq!(key.path(), format!("/{}", key.as_str()));
        }
    }

    #[test]
    fn test_next_prev_cycle() {
        assert_eq!(EndpointKey::User.next(), EndpointKey::Hello);
        assert_eq!(EndpointKey::Hello.prev(), EndpointKey::User);
        for key in EndpointKey::ALL {
            assert_eq!(key.next().prev(), key);
        }
    }

    #[test]
    fn test_status_precedence() {
        let mut record = FetchRecord::loading();
        record.error = Some("boom".into());
        assert_eq!(record.status(), FetchStatus::Loading);

        record.is_loading = false;
        record.payload = Some(json!({"stale": true}));
        assert_eq!(record.status(), FetchStatus::Failed("boom"));

        record.error = None;
        assert_eq!(record.status().label(), "Success");
    }
}
