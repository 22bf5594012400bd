pub mod config;
pub mod firewall;
pub mod scoring;
pub mod server;
pub mod validation;

// Re-export commonly used types
pub use config::ServerConfig;
pub use firewall::{FirewallAction, FirewallDecision, FirewallEngine, FirewallMode};
pub use scoring::{
    CitationResult, CitationValidator, HallucinationDetector, HallucinationResult,
    TrustScoreEngine, TrustScoreResult,
};
pub use server::AppState;
pub use validation::{RequestValidator, ValidationError};
