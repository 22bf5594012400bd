use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::{debug, info};

/// Canonical uncertainty markers, scanned in this order. Matching is plain
/// substring containment, so "might" also fires inside "mighty".
pub const RISK_PHRASES: [&str; 8] = [
    "probably",
    "i think",
    "maybe",
    "not sure",
    "could be",
    "rumored",
    "allegedly",
    "might",
];

/// Score contributed by each distinct risk phrase.
const PHRASE_WEIGHT: u32 = 15;
/// Score applied when the text is too short to carry a verifiable claim.
const SHORT_TEXT_SCORE: u32 = 10;
/// Word count below which the length heuristic fires.
const SHORT_TEXT_WORDS: usize = 3;
/// Score applied when text/context word overlap falls below the threshold.
const CONTEXT_MISMATCH_SCORE: u32 = 40;
/// Minimum fraction of text words that must appear in the context.
const OVERLAP_THRESHOLD: f64 = 0.3;

/// Outcome of a hallucination scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallucinationResult {
    /// 0-100, where 100 is high likelihood of hallucination.
    pub hallucination_probability: u32,
    pub risk_factors: RiskFactors,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    /// Matched phrases in canonical-list order, each at most once.
    pub risk_phrases_detected: Vec<String>,
    pub context_consistency_risk: bool,
    pub length_risk: bool,
}

/// Heuristic hallucination detector. Stateless; every call is a pure
/// function of its inputs.
#[derive(Debug, Default)]
pub struct HallucinationDetector;

impl HallucinationDetector {
    pub fn new() -> Self {
        info!(
            "HallucinationDetector initialized with {} risk phrases",
            RISK_PHRASES.len()
        );
        Self
    }

    /// Scan text for known risk phrases indicating uncertainty.
    pub fn detect_risk_phrases(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        RISK_PHRASES
            .iter()
            .filter(|phrase| lower.contains(*phrase))
            .map(|phrase| phrase.to_string())
            .collect()
    }

    /// Analyze text for potential hallucinations, optionally against a
    /// reference context. Always succeeds, for any input including empty
    /// text.
    pub fn score(&self, text: &str, context: &str) -> HallucinationResult {
        debug!("Computing hallucination score for text length {}", text.len());

        let risk_phrases = self.detect_risk_phrases(text);
        let phrase_score = risk_phrases.len() as u32 * PHRASE_WEIGHT;

        let length_score = if text.split_whitespace().count() < SHORT_TEXT_WORDS {
            SHORT_TEXT_SCORE
        } else {
            0
        };

        let mut consistency_score = 0;
        if !context.is_empty() {
            let text_lower = text.to_lowercase();
            let context_lower = context.to_lowercase();
            let text_words: HashSet<&str> = text_lower.split_whitespace().collect();
            let context_words: HashSet<&str> = context_lower.split_whitespace().collect();

            // Empty word set would divide by zero; treat as consistent.
            if !text_words.is_empty() {
                let overlap = text_words.intersection(&context_words).count();
                if (overlap as f64) / (text_words.len() as f64) < OVERLAP_THRESHOLD {
                    consistency_score = CONTEXT_MISMATCH_SCORE;
                    debug!("Low context overlap detected");
                }
            }
        }

        let probability = (phrase_score + length_score + consistency_score).min(100);
        info!("Hallucination score computed: {}", probability);

        let explanation = format!(
            "Detected {} uncertainty markers. Context overlap analysis {}.",
            risk_phrases.len(),
            if consistency_score > 0 { "failed" } else { "passed" }
        );

        HallucinationResult {
            hallucination_probability: probability,
            risk_factors: RiskFactors {
                risk_phrases_detected: risk_phrases,
                context_consistency_risk: consistency_score > 0,
                length_risk: length_score > 0,
            },
            explanation,
        }
    }
}

/// Deterministic 10-dimensional signature vector for a text, derived from its
/// SHA-256 digest. Stands in where an embedding model would sit; the scoring
/// pipeline never consumes it, it exists only so API consumers that expect a
/// vector per text get a stable one.
pub fn signature_vector(text: &str) -> Vec<f32> {
    let digest = Sha256::digest(text.as_bytes());
    digest
        .chunks(2)
        .take(10)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]) as f32 / u16::MAX as f32)
        .collect()
}
