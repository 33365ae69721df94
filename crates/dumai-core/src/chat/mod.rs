//! Chat turn handling for DumAI.
//!
//! The orchestrator ties the stores and the reply generator together; the
//! sibling modules hold the pure helpers it relies on (title derivation,
//! personality selection, language detection, request validation).

pub mod language;
pub mod orchestrator;
pub mod personality;
pub mod title;
pub mod turn;

pub use language::detect_language;
pub use orchestrator::{ChatOrchestrator, ChatStats};
pub use personality::{FixedPersonality, PERSONALITIES, PersonalityPicker, RandomPersonality};
pub use title::derive_title;
pub use turn::{TurnOutcome, TurnRequest};
