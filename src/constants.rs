pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Session renewal endpoint. A 401 from this path is never retried.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Route the embedding application should navigate to once a refresh fails.
pub const LOGIN_ROUTE: &str = "/login";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
