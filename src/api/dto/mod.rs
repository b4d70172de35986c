//! Request and response bodies.
//!
//! Requests derive `Deserialize` and `Validate`; responses are built from
//! domain entities through `From` impls.

pub mod event;
pub mod guest;
pub mod health;
pub mod pagination;
pub mod transport;
pub mod travel;
