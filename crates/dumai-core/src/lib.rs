//! Session orchestration and repository trait definitions for DumAI.
//!
//! This crate defines the "ports" (repository traits and the reply generator)
//! that the infrastructure layer implements, plus the `ChatOrchestrator` that
//! drives a chat turn. It depends only on `dumai-types` -- never on
//! `dumai-infra` or any storage/HTTP crate.

pub mod chat;
pub mod reply;
pub mod repository;
