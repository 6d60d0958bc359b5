//! Session gate business logic: signed tokens and session storage.

pub mod session;
pub mod signer;
pub mod store;

pub use session::SessionService;
pub use signer::SessionSigner;
pub use store::{MemorySessionStore, SessionStore};
