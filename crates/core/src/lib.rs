#![warn(clippy::all, missing_docs)]

//! Core logic for the contract balance client.
//!
//! This crate hosts configuration handling, the billing API gateways,
//! the session cache and the request flow that re-authenticates once
//! when a cached session turns out to be stale.

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod orchestrator;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use error::{BalanceError, ConfigError, StoreError};
pub use gateway::{AuthGateway, BalanceGateway, HttpGateway};
pub use models::{ApiError, AuthResult, BalanceResult, Contract, SessionInfo};
pub use orchestrator::{RequestOrchestrator, RunState};
pub use session::{SessionManager, SessionStore};
