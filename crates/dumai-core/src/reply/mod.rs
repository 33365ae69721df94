//! Reply generator abstractions for DumAI.
//!
//! - `ReplyGenerator`: RPITIT trait for concrete generator backends
//! - `BoxReplyGenerator`: object-safe wrapper for runtime backend selection

pub mod box_generator;
pub mod generator;

pub use box_generator::BoxReplyGenerator;
pub use generator::ReplyGenerator;
