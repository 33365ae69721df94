//! Groq reply generator (OpenAI-compatible chat completions over reqwest).

pub mod client;
pub mod types;

pub use client::GroqReplyGenerator;
