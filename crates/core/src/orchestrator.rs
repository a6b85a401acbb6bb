//! Balance request flow with a single re-authentication on failure.

use tracing::{debug, warn};

use crate::{
    config::AppConfig,
    error::Result,
    gateway::{AuthGateway, BalanceGateway},
    models::{BalanceResult, STATUS_OK},
    session::SessionManager,
};

/// Progress of a single [`RequestOrchestrator::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing has been requested yet.
    Idle,
    /// The first balance answer arrived.
    FetchedOnce,
    /// The first answer was successful.
    Success,
    /// The session is being refreshed for the one retry.
    Retrying,
    /// The retry answer arrived; no further attempts follow.
    Done,
}

/// Any non-success balance answer may mean the server dropped the session.
/// Expired sessions have shown up as both 401 and 403, so no code is special-cased.
pub fn session_possibly_stale(result: &BalanceResult) -> bool {
    result.status_code != STATUS_OK
}

/// Fetches the balance, refreshing the session and retrying exactly once when
/// the first answer is not successful.
pub struct RequestOrchestrator<'a, A, B>
where
    A: AuthGateway + ?Sized,
    B: BalanceGateway + ?Sized,
{
    sessions: SessionManager<'a, A>,
    balance: &'a B,
    force_refresh: bool,
}

impl<'a, A, B> RequestOrchestrator<'a, A, B>
where
    A: AuthGateway + ?Sized,
    B: BalanceGateway + ?Sized,
{
    /// Combine a session manager with a balance gateway.
    pub fn new(sessions: SessionManager<'a, A>, balance: &'a B) -> Self {
        Self {
            sessions,
            balance,
            force_refresh: false,
        }
    }

    /// Skip the cached session on the first attempt as well.
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// Run the request flow and return the last balance answer.
    ///
    /// The returned result may still be unsuccessful after the retry; callers
    /// decide how to report it.
    pub fn run(&self, config: &AppConfig) -> Result<BalanceResult> {
        let mut state = RunState::Idle;

        let session = self.sessions.acquire(config, self.force_refresh)?;
        let result = self.balance.fetch_balance(config, &session)?;
        advance(&mut state, RunState::FetchedOnce);

        if !session_possibly_stale(&result) {
            advance(&mut state, RunState::Success);
            return Ok(result);
        }

        warn!(
            "balance request answered with code {}, re-authenticating",
            result.status_code
        );
        advance(&mut state, RunState::Retrying);
        let session = self.sessions.acquire(config, true)?;
        let result = self.balance.fetch_balance(config, &session)?;
        advance(&mut state, RunState::Done);
        Ok(result)
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug!("request state {:?} -> {:?}", state, next);
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::SessionInfo,
        session::SessionStore,
        testing::{auth_ok, balance, sample_config, FakeAuth, FakeBalance},
    };
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn success_with_cached_session_needs_one_fetch() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path().join("session.id"));
        store.save(&SessionInfo::new("cached", "c1"))?;
        let auth = FakeAuth::new(vec![]);
        let fetcher = FakeBalance::new(vec![balance(200, "10.00")]);

        let orchestrator = RequestOrchestrator::new(SessionManager::new(&auth, store), &fetcher);
        let result = orchestrator.run(&sample_config())?;

        assert_eq!(result.balance, "10.00");
        assert_eq!(auth.calls(), 0);
        assert_eq!(fetcher.sessions(), vec![SessionInfo::new("cached", "c1")]);
        Ok(())
    }

    #[test]
    fn stale_session_is_refreshed_once() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path().join("session.id"));
        store.save(&SessionInfo::new("stale", "c1"))?;
        let auth = FakeAuth::new(vec![auth_ok("fresh", &[("c1", "AB-01")])]);
        let fetcher = FakeBalance::new(vec![balance(403, ""), balance(200, "42.50")]);

        let orchestrator =
            RequestOrchestrator::new(SessionManager::new(&auth, store.clone()), &fetcher);
        let result = orchestrator.run(&sample_config())?;

        assert!(result.is_success());
        assert_eq!(result.balance, "42.50");
        assert_eq!(auth.calls(), 1);
        assert_eq!(
            fetcher.sessions(),
            vec![
                SessionInfo::new("stale", "c1"),
                SessionInfo::new("fresh", "c1")
            ]
        );
        assert_eq!(store.load()?.session_id, "fresh");
        Ok(())
    }

    #[test]
    fn second_failure_is_returned_without_third_attempt() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path().join("session.id"));
        let auth = FakeAuth::new(vec![
            auth_ok("first", &[("c1", "AB-01")]),
            auth_ok("second", &[("c1", "AB-01")]),
        ]);
        let fetcher = FakeBalance::new(vec![
            balance(401, ""),
            balance(403, ""),
            balance(200, "never"),
        ]);

        let orchestrator = RequestOrchestrator::new(SessionManager::new(&auth, store), &fetcher);
        let result = orchestrator.run(&sample_config())?;

        assert_eq!(result.status_code, 403);
        assert_eq!(auth.calls(), 2);
        assert_eq!(fetcher.calls(), 2);
        Ok(())
    }

    #[test]
    fn forced_first_attempt_still_retries_once() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path().join("session.id"));
        store.save(&SessionInfo::new("cached", "c1"))?;
        let auth = FakeAuth::new(vec![
            auth_ok("first", &[("c1", "AB-01")]),
            auth_ok("second", &[("c1", "AB-01")]),
        ]);
        let fetcher = FakeBalance::new(vec![balance(500, ""), balance(200, "1.00")]);

        let orchestrator = RequestOrchestrator::new(SessionManager::new(&auth, store), &fetcher)
            .with_force_refresh(true);
        let result = orchestrator.run(&sample_config())?;

        assert_eq!(result.balance, "1.00");
        assert_eq!(auth.calls(), 2);
        assert_eq!(fetcher.sessions()[0].session_id, "first");
        Ok(())
    }

    #[test]
    fn failed_reauthentication_aborts_the_run() -> Result<()> {
        let dir = tempdir()?;
        let store = SessionStore::new(dir.path().join("session.id"));
        store.save(&SessionInfo::new("stale", "c1"))?;
        let auth = FakeAuth::new(vec![crate::models::AuthResult {
            status_code: 401,
            ..Default::default()
        }]);
        let fetcher = FakeBalance::new(vec![balance(403, "")]);

        let orchestrator = RequestOrchestrator::new(SessionManager::new(&auth, store), &fetcher);
        assert!(orchestrator.run(&sample_config()).is_err());
        assert_eq!(fetcher.calls(), 1);
        Ok(())
    }

    #[test]
    fn only_success_code_counts_as_fresh() {
        assert!(!session_possibly_stale(&balance(200, "1")));
        assert!(session_possibly_stale(&balance(401, "")));
        assert!(session_possibly_stale(&balance(403, "")));
        assert!(session_possibly_stale(&balance(0, "")));
    }
}
