//! Suitability scorer. Maps a (candidate, job) pair onto a 0 to 100 score.
//!
//! Three independently weighted sub-scores:
//! - skills      (70): bidirectional substring match of required vs candidate skills
//! - education   (20): degree / subject keyword presence in both education blobs
//! - experience  (10): experience entry count against the required year count
//!
//! Sub-scores are reported to one decimal place and `total_score` is the rounded
//! sum of the reported values, so the breakdown always adds up on the wire.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{CandidateProfile, JobProfile, ScoreBreakdown};

pub const SKILL_WEIGHT: f64 = 70.0;
pub const EDUCATION_WEIGHT: f64 = 20.0;
pub const EXPERIENCE_WEIGHT: f64 = 10.0;

/// Base education credit when the candidate lists any recognised keyword.
const EDUCATION_BASE: f64 = 15.0;
/// Floor applied when the job asks for pursuing/completed studies and the candidate is at university.
const EDUCATION_ENROLLED_FLOOR: f64 = 18.0;

/// Degree levels followed by subject areas. Matched as plain substrings.
const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "diploma",
    "degree",
    "bs",
    "ms",
    "computer science",
    "data science",
    "mathematics",
    "engineering",
    "statistics",
    "ai",
    "artificial intelligence",
    "machine learning",
];

static REQUIRED_YEARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)[-\s]?(?:year|yr)").expect("valid years regex"));

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Scores a candidate against a job. Total on well-formed input: empty lists score zero.
pub fn score_match(candidate: &CandidateProfile, job: &JobProfile) -> ScoreBreakdown {
    let skills = score_skills(&candidate.skills, &job.required_skills);
    let education_score = round_one_decimal(score_education(
        &candidate.education,
        &job.qualifications,
    ));
    let experience = score_experience(&candidate.experience, &job.experience_needed);

    let skill_score = round_one_decimal(skills.score);
    let experience_score = round_one_decimal(experience.score);
    let total_score = (skill_score + education_score + experience_score).round() as u32;

    ScoreBreakdown {
        total_score,
        skill_score,
        education_score,
        experience_score,
        skill_match_count: skills.matched,
        required_skill_count: skills.required,
        education_match_found: education_score > 0.0,
        experience_match_found: experience.has_relevant,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

struct SkillOutcome {
    score: f64,
    matched: u32,
    required: u32,
}

/// A required skill is covered when it contains, or is contained in, any candidate skill.
/// Candidate skills are not consumed: one may cover several requirements.
fn score_skills(candidate_skills: &[String], required_skills: &[String]) -> SkillOutcome {
    let candidate = normalize_all(candidate_skills);
    let required = normalize_all(required_skills);

    if required.is_empty() {
        return SkillOutcome {
            score: 0.0,
            matched: 0,
            required: 0,
        };
    }

    let matched = required
        .iter()
        .filter(|req| {
            candidate
                .iter()
                .any(|have| have.contains(req.as_str()) || req.contains(have.as_str()))
        })
        .count();

    SkillOutcome {
        score: (matched as f64 / required.len() as f64) * SKILL_WEIGHT,
        matched: matched as u32,
        required: required.len() as u32,
    }
}

fn normalize_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.trim().to_lowercase()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

fn score_education(education: &[String], qualifications: &[String]) -> f64 {
    if qualifications.is_empty() {
        return 0.0;
    }

    let candidate_blob = join_lowercase(education);
    let job_blob = join_lowercase(qualifications);

    let has_relevant_education = EDUCATION_KEYWORDS
        .iter()
        .any(|kw| candidate_blob.contains(kw));
    let shared_keywords = EDUCATION_KEYWORDS
        .iter()
        .filter(|kw| candidate_blob.contains(*kw) && job_blob.contains(*kw))
        .count();

    let mut score = 0.0;
    if has_relevant_education {
        score = if shared_keywords > 0 {
            EDUCATION_WEIGHT
        } else {
            EDUCATION_BASE
        };
    }

    let job_wants_enrollment = job_blob.contains("pursuing") || job_blob.contains("completed");
    let candidate_enrolled =
        candidate_blob.contains("bachelor") || candidate_blob.contains("university");
    if job_wants_enrollment && candidate_enrolled {
        score = f64::max(score, EDUCATION_ENROLLED_FLOOR);
    }

    score
}

fn join_lowercase(items: &[String]) -> String {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

struct ExperienceOutcome {
    score: f64,
    has_relevant: bool,
}

fn score_experience(experience: &[String], experience_needed: &str) -> ExperienceOutcome {
    let entry_count = experience.iter().filter(|e| !e.trim().is_empty()).count();
    let required_years = parse_required_years(experience_needed);

    let score = match entry_count {
        0 => 0.0,
        // Entry-level or internship: any experience qualifies.
        _ if required_years <= 1 => EXPERIENCE_WEIGHT,
        n => f64::min(
            EXPERIENCE_WEIGHT,
            (n as f64 / required_years as f64) * EXPERIENCE_WEIGHT,
        ),
    };

    ExperienceOutcome {
        score,
        has_relevant: entry_count > 0,
    }
}

/// First integer directly followed by "year"/"yr" ("3 years", "2-year", "10yrs"); 0 if absent.
/// "5+ years" has no such integer and counts as entry-level.
pub fn parse_required_years(text: &str) -> u32 {
    REQUIRED_YEARS
        .captures(&text.to_lowercase())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
