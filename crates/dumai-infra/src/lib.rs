//! Infrastructure layer for DumAI.
//!
//! Contains implementations of the ports defined in `dumai-core`: in-memory
//! identity, session and message stores, the Groq reply generator, and the
//! configuration loader.

pub mod config;
pub mod llm;
pub mod memory;
