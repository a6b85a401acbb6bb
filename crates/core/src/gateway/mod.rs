//! Network boundary of the client.
//!
//! Both gateways treat a non-success status code as data: only transport and
//! decode failures are reported as errors.

/// Blocking HTTP implementation of both gateways.
pub mod http;

pub use http::HttpGateway;

use crate::{
    config::AppConfig,
    error::Result,
    models::{AuthResult, BalanceResult, SessionInfo},
};

/// Credential-based authentication against the billing API.
pub trait AuthGateway {
    /// Send the configured credentials and return the server's answer.
    fn authenticate(&self, config: &AppConfig) -> Result<AuthResult>;
}

/// Balance lookup for an established session.
pub trait BalanceGateway {
    /// Fetch balance data for the session's contract.
    fn fetch_balance(&self, config: &AppConfig, session: &SessionInfo) -> Result<BalanceResult>;
}
