use serde::{Deserialize, Serialize};
use tracing::info;

use super::citations::{CitationResult, CitationValidator};
use super::hallucination::{HallucinationDetector, HallucinationResult};

const BASE_SCORE: u32 = 100;
/// Penalty multiplier applied to the hallucination probability.
const PENALTY_MULTIPLIER: f64 = 1.5;
/// Maximum uplift a perfect citation score can contribute. Grounding helps,
/// but cannot fully offset a high hallucination probability.
const GROUNDING_WEIGHT: f64 = 20.0;

/// Coarse reliability label derived from the trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Unsafe,
    Caution,
    Strong,
}

impl RiskCategory {
    /// Category boundaries are non-overlapping and evaluated on the
    /// truncated integer score.
    pub fn from_score(trust_score: u32) -> Self {
        if trust_score > 70 {
            RiskCategory::Strong
        } else if trust_score > 30 {
            RiskCategory::Caution
        } else {
            RiskCategory::Unsafe
        }
    }
}

/// Signed contributions to the trust score. The penalty is stored as a
/// negated magnitude so the sign convention lives in the type, not in the
/// arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Always <= 0.
    pub hallucination_penalty: i64,
    /// Always >= 0.
    pub grounding_bonus: i64,
    /// Constant 100.
    pub base_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustDetails {
    pub hallucination: HallucinationResult,
    pub citations: CitationResult,
}

/// Final trust verdict for a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScoreResult {
    /// 0-100, clamped.
    pub trust_score: u32,
    pub risk_category: RiskCategory,
    pub breakdown: ScoreBreakdown,
    pub details: TrustDetails,
}

/// Aggregates detector and validator signals into a single trust score.
#[derive(Debug, Default)]
pub struct TrustScoreEngine {
    detector: HallucinationDetector,
    validator: CitationValidator,
}

impl TrustScoreEngine {
    pub fn new() -> Self {
        Self {
            detector: HallucinationDetector::new(),
            validator: CitationValidator::new(),
        }
    }

    /// Compute the weighted trust score for a text, optionally against a
    /// reference context. Deterministic: identical inputs yield identical
    /// results.
    pub fn aggregate(&self, text: &str, context: &str) -> TrustScoreResult {
        // The two signal sources are independent; evaluation order does not
        // matter.
        let hallucination = self.detector.score(text, context);
        let citations = self.validator.validate(text);

        let penalty = f64::from(hallucination.hallucination_probability) * PENALTY_MULTIPLIER;
        let grounding_bonus = f64::from(citations.citation_score) / 100.0 * GROUNDING_WEIGHT;
        let raw_score = f64::from(BASE_SCORE) - penalty + grounding_bonus;

        // Truncate toward zero when narrowing, then clamp into range.
        let trust_score = (raw_score as i64).clamp(0, 100) as u32;
        let risk_category = RiskCategory::from_score(trust_score);

        info!("Trust score: {} ({:?})", trust_score, risk_category);

        TrustScoreResult {
            trust_score,
            risk_category,
            breakdown: ScoreBreakdown {
                hallucination_penalty: -(penalty as i64),
                grounding_bonus: grounding_bonus as i64,
                base_score: BASE_SCORE,
            },
            details: TrustDetails {
                hallucination,
                citations,
            },
        }
    }
}
