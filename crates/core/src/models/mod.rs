//! Shared domain models.

use serde::{Deserialize, Serialize};

/// Status code the billing API uses for a successful call.
pub const STATUS_OK: i64 = 200;

/// Error entry reported by the billing API alongside a status code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Server-side error category.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
}

/// Billing contract available to the authenticated account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Identifier used by the balance endpoint.
    #[serde(default)]
    pub id: String,
    /// Human readable contract number.
    #[serde(default)]
    pub number: String,
}

/// Server session paired with the selected contract. This is the cached record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session identifier issued by the authentication endpoint.
    #[serde(rename = "Session_id")]
    pub session_id: String,
    /// Contract the balance is requested for.
    #[serde(rename = "Contract_id")]
    pub contract_id: String,
}

impl SessionInfo {
    /// Build a session record from its two identifiers.
    pub fn new(session_id: impl Into<String>, contract_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            contract_id: contract_id.into(),
        }
    }

    /// True when both identifiers are present.
    pub fn is_complete(&self) -> bool {
        !self.session_id.is_empty() && !self.contract_id.is_empty()
    }
}

/// Outcome of an authentication call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthResult {
    /// Status code reported by the server.
    pub status_code: i64,
    /// Errors reported by the server, in order.
    pub errors: Vec<ApiError>,
    /// Issued session identifier.
    pub session_id: String,
    /// Contracts available to the account, in server order.
    pub contracts: Vec<Contract>,
}

/// Outcome of a balance call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceResult {
    /// Status code reported by the server.
    pub status_code: i64,
    /// Errors reported by the server, in order.
    pub errors: Vec<ApiError>,
    /// Balance as formatted by the server.
    pub balance: String,
}

impl BalanceResult {
    /// True when the server reported success.
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// Last error message reported by the server, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.errors.last().map(|err| err.message.as_str())
    }
}
