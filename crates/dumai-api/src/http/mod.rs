//! HTTP/REST API layer for DumAI.
//!
//! Axum-based JSON API under `/api/`, plus `/health` and optional static SPA
//! serving.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
