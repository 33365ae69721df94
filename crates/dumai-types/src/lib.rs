//! Shared domain types for DumAI.
//!
//! This crate contains the core domain types used across the DumAI backend:
//! Identity, ChatSession, ChatMessage, the configuration tree, and the error
//! enums shared between the core and the transport layers.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
