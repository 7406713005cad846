// ABOUTME: Centralized constants for the PokeAPI SDK
// ABOUTME: Contains retry configuration, timeouts, endpoint paths, and fan-out limits

/// Retry configuration constants
pub mod retry {
    use std::time::Duration;

    /// Maximum number of retry attempts
    pub const MAX_RETRIES: u32 = 2;

    /// Initial delay before first retry
    pub const INITIAL_DELAY: Duration = Duration::from_millis(100);

    /// Maximum delay between retries
    pub const MAX_DELAY: Duration = Duration::from_secs(5);

    /// Backoff multiplier for exponential backoff
    pub const BACKOFF_MULTIPLIER: f64 = 2.0;
}

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// PokeAPI URLs
pub mod urls {
    /// Public PokeAPI host
    pub const POKEAPI_BASE: &str = "https://pokeapi.co";

    /// Detail endpoint, the creature name or id is appended
    pub const CREATURE_PATH: &str = "/api/v2/pokemon/";

    /// List endpoint
    pub const CREATURE_LIST_PATH: &str = "/api/v2/pokemon";

    pub const USER_AGENT: &str = "pokeascii/0.1.0";
}

/// Bounded fan-out settings
pub mod fetch {
    /// Upper bound on concurrent upstream requests during a batch fetch.
    /// PokeAPI has no published limit; five keeps us polite.
    pub const DEFAULT_CONCURRENCY: usize = 5;
}
