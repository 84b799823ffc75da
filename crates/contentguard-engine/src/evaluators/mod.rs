//! Per-category rule sets
//!
//! Each evaluator is a pure function from its input (statistics or class
//! probabilities) and its threshold record to an [`EvaluationResult`]. All
//! gates compare with strict `>`.
//!
//! [`EvaluationResult`]: contentguard_core::EvaluationResult

pub mod drugs;
pub mod nsfw;
pub mod violence;
pub mod weapons;
