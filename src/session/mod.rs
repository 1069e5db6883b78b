//! Player sessions and the store that owns them.

pub mod store;
pub mod types;

pub use store::{lock_session, SessionHandle, SessionStore};
pub use types::*;
