//! Repository trait definitions (ports) for the DumAI stores.
//!
//! Each trait has a single owner of its records: identities, sessions and
//! messages are stored independently and only linked by id.

pub mod identity;
pub mod message;
pub mod session;

pub use identity::IdentityRepository;
pub use message::MessageRepository;
pub use session::SessionRepository;
