pub mod profile;
pub mod result;

pub use profile::{CandidateProfile, JobProfile};
pub use result::{MatchResult, ScoreBreakdown};
