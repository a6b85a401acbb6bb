use tracing::{info, warn};

use crate::{
    config::AppConfig,
    error::{BalanceError, Result},
    gateway::AuthGateway,
    models::{AuthResult, SessionInfo, STATUS_OK},
};

use super::{contract, SessionStore};

const FALLBACK_AUTH_MESSAGE: &str = "authentication failed";

/// Hands out a usable session, preferring the on-disk cache.
pub struct SessionManager<'a, A: AuthGateway + ?Sized> {
    auth: &'a A,
    store: SessionStore,
}

impl<'a, A: AuthGateway + ?Sized> SessionManager<'a, A> {
    /// Create a manager authenticating through `auth` and caching in `store`.
    pub fn new(auth: &'a A, store: SessionStore) -> Self {
        Self { auth, store }
    }

    /// Return a session for `config`.
    ///
    /// Unless `force_refresh` is set, a valid cached record is returned without
    /// touching the network. Otherwise exactly one authentication call is made
    /// and the new record is cached; a failure to cache is logged and ignored.
    pub fn acquire(&self, config: &AppConfig, force_refresh: bool) -> Result<SessionInfo> {
        if !force_refresh {
            match self.store.load() {
                Ok(session) => {
                    info!("using cached session from {}", self.store.path().display());
                    return Ok(session);
                }
                Err(err) => warn!("{err}"),
            }
        }

        let session = self.from_server(config)?;
        if let Err(err) = self.store.save(&session) {
            warn!("session not cached: {err}");
        }
        Ok(session)
    }

    fn from_server(&self, config: &AppConfig) -> Result<SessionInfo> {
        info!("requesting a new session from the server");
        let answer = self.auth.authenticate(config)?;
        if answer.status_code != STATUS_OK {
            return Err(auth_failure(answer));
        }
        info!("authenticated as {}", config.login);

        let contract = contract::resolve(&answer.contracts, &config.contract)?;
        let session = SessionInfo::new(answer.session_id.clone(), contract.id.clone());
        if !session.is_complete() {
            return Err(BalanceError::AuthenticationFailed {
                code: answer.status_code,
                message: "server returned an incomplete session".to_string(),
            });
        }
        Ok(session)
    }
}

fn auth_failure(answer: AuthResult) -> BalanceError {
    let message = answer
        .errors
        .into_iter()
        .last()
        .map(|err| err.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FALLBACK_AUTH_MESSAGE.to_string());
    BalanceError::AuthenticationFailed {
        code: answer.status_code,
        message,
    }
}
