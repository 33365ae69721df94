//! Reply generator implementations.
//!
//! Contains the concrete [`ReplyGenerator`](dumai_core::reply::ReplyGenerator)
//! backends. Only Groq is shipped; anything OpenAI-compatible works by
//! pointing `llm.base_url` elsewhere.

pub mod groq;

pub use groq::GroqReplyGenerator;
