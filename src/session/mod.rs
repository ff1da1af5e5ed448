//! Session state: persisted token and language, plus view routing

pub mod context;
pub mod guard;
pub mod store;

pub use context::{SessionContext, SessionHandle};
pub use guard::{logout, resolve, View};
pub use store::{open_store, FileStore, KeyringStore, MemoryStore, SessionStore};
