//! Cross-module integration flows.

pub mod concurrency;
pub mod end_to_end;
