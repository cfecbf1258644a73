//! The chat-turn engine: context assembly, preference extraction, and turn
//! orchestration.

pub mod engine;
pub mod preferences;
pub mod prompt;

pub use engine::{TurnEngine, TurnOutcome};
