//! Event, certificate and on-duty request stores for the campus portal
//!
//! Each store owns one collection and the operations that mutate it. Stores
//! are plain owned values mutated through `&mut self`; whoever composes them
//! decides how they are shared. A store opened over a
//! [`local_storage::LocalStorage`] rehydrates from it and writes the whole
//! collection back after every mutation.

mod bulk;
mod certificate_store;
mod error;
mod event_store;
mod filter;
mod od_store;
mod persist;
mod policy;
mod upload;

pub use bulk::*;
pub use certificate_store::*;
pub use error::*;
pub use event_store::*;
pub use filter::*;
pub use od_store::*;
pub use persist::*;
pub use policy::*;
pub use upload::*;
