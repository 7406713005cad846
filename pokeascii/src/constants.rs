// ABOUTME: Centralized constants for the pokeascii application
// ABOUTME: Contains defaults, config file locations, HTTP routes, and UI timings

/// Defaults used when neither config nor flags say otherwise
pub mod defaults {
    /// Creature shown by `pokeascii show` without an argument
    pub const CREATURE: &str = "snorlax";

    pub const BIND_ADDR: &str = "127.0.0.1:8080";

    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Config file discovery
pub mod paths {
    /// Project-local config file, looked up in the working directory
    pub const LOCAL_CONFIG_FILE: &str = "pokeascii.toml";

    /// Directory under the XDG config home
    pub const CONFIG_DIR: &str = "pokeascii";

    pub const CONFIG_FILE: &str = "config.toml";
}

/// HTTP server routes
pub mod routes {
    pub const ALL: &str = "/pokemon/all";
    pub const CREATURE_PREFIX: &str = "/pokemon/";
    pub const HEALTH: &str = "/health";
}

pub mod ui {
    /// Spinner tick interval while a batch fetch runs
    pub const PROGRESS_TICK_MS: u64 = 80;
}
