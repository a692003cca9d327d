// Deterministic suitability scoring: no I/O, no LLM calls, safe to call from any task.

pub mod interpretation;
pub mod scorer;

pub use interpretation::interpret;
pub use scorer::score_match;
