//! Authentication module for session management.
//!
//! The session is an explicit value holding the bearer token and the signed
//! in user. It is persisted to `session.json` in the cache directory and
//! applied to an `ApiClient` before authenticated calls.

pub mod session;

pub use session::{Session, SessionData};
