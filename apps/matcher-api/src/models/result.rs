use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::{CandidateProfile, JobProfile};

/// Weighted suitability score for one (candidate, job) pair.
///
/// `total_score` is always the rounded sum of the three sub-scores as reported here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub total_score: u32,
    /// 0 – 70
    pub skill_score: f64,
    /// 0 – 20
    pub education_score: f64,
    /// 0 – 10
    pub experience_score: f64,
    pub skill_match_count: u32,
    pub required_skill_count: u32,
    pub education_match_found: bool,
    pub experience_match_found: bool,
}

/// Terminal artifact of a match request: persisted as JSON and returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub candidate: CandidateProfile,
    pub job: JobProfile,
    pub score_breakdown: ScoreBreakdown,
    pub timestamp: DateTime<Utc>,
    pub interpretation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_match_result_timestamp_is_iso8601() {
        let result = MatchResult {
            candidate: CandidateProfile::default(),
            job: JobProfile::default(),
            score_breakdown: ScoreBreakdown {
                total_score: 0,
                skill_score: 0.0,
                education_score: 0.0,
                experience_score: 0.0,
                skill_match_count: 0,
                required_skill_count: 0,
                education_match_found: false,
                experience_match_found: false,
            },
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            interpretation: "Low Match. Significant skill gaps present.".to_string(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["timestamp"], "2024-05-01T09:30:00Z");
        assert_eq!(value["scoreBreakdown"]["totalScore"], 0);
        assert!(value["scoreBreakdown"].get("skillMatchCount").is_some());
        assert!(value["job"].get("requiredSkills").is_some());
    }
}
