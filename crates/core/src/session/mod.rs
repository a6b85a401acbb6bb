//! Session acquisition, contract selection and caching.

/// Contract selection from an authentication answer.
pub mod contract;
mod manager;
mod store;

pub use manager::SessionManager;
pub use store::SessionStore;
