//! Session bookkeeping for the campus portal.
//!
//! This crate tracks who is signed in, and as what role, using two entries
//! in a [`local_storage::LocalStorage`]. There is no credential, token or
//! expiry: it decides where to route the user, nothing more.

mod error;
mod navigator;
mod session;

pub use error::*;
pub use navigator::*;
pub use session::*;

/// Route for users without a session.
pub const LOGIN_PATH: &str = "/auth/login";
