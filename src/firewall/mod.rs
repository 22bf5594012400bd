use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Text substituted for blocked content.
pub const BLOCK_NOTICE: &str =
    "[CONTENT BLOCKED BY TRUST FIREWALL: High Hallucination Risk Detected]";
/// Warning attached to blocked responses.
pub const BLOCKED_WARNING: &str = "This response was blocked due to low trust score.";
/// Warning attached to softened responses and embedded in their banner.
pub const SOFTEN_WARNING: &str = "Caution: This response may contain unverified information.";

/// Policy profile controlling the block/warn thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallMode {
    Strict,
    #[default]
    Balanced,
    Permissive,
}

impl FirewallMode {
    /// (block_threshold, warn_threshold) for this mode.
    pub fn thresholds(self) -> (u32, u32) {
        match self {
            FirewallMode::Strict => (50, 85),
            FirewallMode::Balanced => (30, 70),
            FirewallMode::Permissive => (15, 50),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FirewallMode::Strict => "strict",
            FirewallMode::Balanced => "balanced",
            FirewallMode::Permissive => "permissive",
        }
    }

    /// Parse a mode string, falling back to `fallback` on anything
    /// unrecognized. Invalid modes are logged and never become errors.
    pub fn parse_or(value: &str, fallback: FirewallMode) -> FirewallMode {
        match value.parse() {
            Ok(mode) => mode,
            Err(_) => {
                warn!(
                    "Attempted to set invalid firewall mode: {}, keeping {}",
                    value, fallback
                );
                fallback
            }
        }
    }
}

impl fmt::Display for FirewallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FirewallMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(FirewallMode::Strict),
            "balanced" => Ok(FirewallMode::Balanced),
            "permissive" => Ok(FirewallMode::Permissive),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown firewall mode: {0}")]
pub struct UnknownModeError(pub String);

/// Enforcement action for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirewallAction {
    Pass,
    Soften,
    Block,
}

/// Enforcement outcome. `final_output == original_text` exactly when the
/// action is PASS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallDecision {
    pub action: FirewallAction,
    pub original_text: String,
    pub final_output: String,
    pub firewall_mode: FirewallMode,
    pub warning_message: Option<String>,
}

/// Enforces policies based on trust scores and an operating mode. The mode
/// is a per-call parameter rather than engine state, so a shared engine is
/// safe under concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirewallEngine {
    default_mode: FirewallMode,
}

impl FirewallEngine {
    pub fn new(default_mode: FirewallMode) -> Self {
        info!("FirewallEngine initialized in '{}' mode", default_mode);
        Self { default_mode }
    }

    pub fn default_mode(&self) -> FirewallMode {
        self.default_mode
    }

    /// Resolve an optional request-supplied mode string against the
    /// configured default.
    pub fn resolve_mode(&self, requested: Option<&str>) -> FirewallMode {
        match requested {
            Some(value) => FirewallMode::parse_or(value, self.default_mode),
            None => self.default_mode,
        }
    }

    /// Decide the action for a text given its trust score. Scores equal to a
    /// threshold fall to the next, less restrictive branch. The score is
    /// taken as-is; the aggregator's contract already clamped it.
    pub fn decide(&self, text: &str, trust_score: u32, mode: FirewallMode) -> FirewallDecision {
        let (block_threshold, warn_threshold) = mode.thresholds();

        if trust_score < block_threshold {
            warn!(
                "Content BLOCKED. Score: {} < Threshold: {}",
                trust_score, block_threshold
            );
            return FirewallDecision {
                action: FirewallAction::Block,
                original_text: text.to_string(),
                final_output: BLOCK_NOTICE.to_string(),
                firewall_mode: mode,
                warning_message: Some(BLOCKED_WARNING.to_string()),
            };
        }

        if trust_score < warn_threshold {
            info!(
                "Content SOFTENED. Score: {} < Threshold: {}",
                trust_score, warn_threshold
            );
            return FirewallDecision {
                action: FirewallAction::Soften,
                original_text: text.to_string(),
                final_output: format!("[TRUST FIREWALL WARNING: {}]\n\n{}", SOFTEN_WARNING, text),
                firewall_mode: mode,
                warning_message: Some(SOFTEN_WARNING.to_string()),
            };
        }

        FirewallDecision {
            action: FirewallAction::Pass,
            original_text: text.to_string(),
            final_output: text.to_string(),
            firewall_mode: mode,
            warning_message: None,
        }
    }
}
