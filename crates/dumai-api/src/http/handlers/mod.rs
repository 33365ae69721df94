//! HTTP request handlers, one module per resource.

pub mod chat;
pub mod message;
pub mod session;
pub mod stats;
pub mod user;
