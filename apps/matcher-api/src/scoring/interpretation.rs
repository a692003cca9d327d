use serde::{Deserialize, Serialize};

/// Qualitative band for a total score. Bands are closed below and checked highest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBand {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl MatchBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            MatchBand::Excellent
        } else if score >= 60 {
            MatchBand::Good
        } else if score >= 40 {
            MatchBand::Moderate
        } else {
            MatchBand::Low
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MatchBand::Excellent => "Excellent Match! Highly suitable candidate.",
            MatchBand::Good => "Good Match! Suitable candidate with room for growth.",
            MatchBand::Moderate => "Moderate Match. Some key skills may be missing.",
            MatchBand::Low => "Low Match. Significant skill gaps present.",
        }
    }
}

/// Human-readable interpretation of a total score.
pub fn interpret(score: u32) -> &'static str {
    MatchBand::from_score(score).message()
}
