//! Authentication types and session state.
//!
//! A [`Session`] records which API variant the recorder exposes and the
//! session identifier issued at login.

mod credentials;
mod session;

pub use credentials::Credentials;
pub use session::{Session, SessionId};
