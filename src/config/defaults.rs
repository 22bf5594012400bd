/// Default configuration constants for the Trust Firewall server

// Server defaults
pub const DEFAULT_PORT: u16 = 8000;
pub const API_PREFIX: &str = "/api";

// Request size limits
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1_048_576; // 1MB
pub const DEFAULT_MAX_CONTEXT_LENGTH: usize = 1_048_576; // 1MB

// Config file locations
pub const CONFIG_DIR_NAME: &str = "trust-firewall";
pub const CONFIG_FILENAME: &str = "config.toml";
