//! Core entity definitions for the campus portal.
//!
//! This crate defines the data types shared by the portal stores and the
//! session helper: events, certificates, on-duty requests and the minimal
//! user identity. Field names serialize in camelCase so that state persisted
//! by the browser client can be read back unchanged.

mod certificate;
mod date;
mod event;
mod od_request;
mod user;

pub use certificate::*;
pub use event::*;
pub use od_request::*;
pub use user::*;
