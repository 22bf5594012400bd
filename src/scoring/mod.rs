pub mod citations;
pub mod hallucination;
pub mod trust;

pub use citations::{CitationResult, CitationValidator, ClaimVerification, ConfidenceNoise};
pub use hallucination::{signature_vector, HallucinationDetector, HallucinationResult, RiskFactors};
pub use trust::{RiskCategory, ScoreBreakdown, TrustDetails, TrustScoreEngine, TrustScoreResult};
