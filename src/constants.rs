//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default API base when nothing is configured
pub const DEFAULT_API_URL: &str = "/api";

/// Origin used to resolve a relative API base
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the API base
pub const ENV_API_URL: &str = "APIDASH_API_URL";

/// Environment variable overriding the origin
pub const ENV_ORIGIN: &str = "APIDASH_ORIGIN";

/// Directory under the home dir holding the config file
pub const CONFIG_DIR_NAME: &str = ".apidash";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "apidash.log";

/// Application name
pub const APP_NAME: &str = "API Dashboard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
