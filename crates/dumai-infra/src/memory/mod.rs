//! In-memory store implementations of the dumai-core repository traits.
//!
//! Each store owns one `DashMap` and an `AtomicU64` id counter. Records are
//! cloned on read so no `DashMap` guard ever outlives a call, and every write
//! replaces the whole record.

pub mod identity;
pub mod message;
pub mod session;

pub use identity::InMemoryIdentityStore;
pub use message::InMemoryMessageLog;
pub use session::InMemorySessionStore;
