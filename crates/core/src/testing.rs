//! Scripted gateway doubles shared by unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::{
    config::{AppConfig, DEFAULT_SESSION_FILE},
    error::Result,
    gateway::{AuthGateway, BalanceGateway},
    models::{AuthResult, BalanceResult, Contract, SessionInfo, STATUS_OK},
};

pub fn sample_config() -> AppConfig {
    AppConfig {
        api_site: "https://api.example.com".to_string(),
        api_token: "token".to_string(),
        login: "user".to_string(),
        password: "secret".to_string(),
        contract: String::new(),
        session_file: DEFAULT_SESSION_FILE.to_string(),
        timeout_secs: 30,
    }
}

pub fn auth_ok(session_id: &str, contracts: &[(&str, &str)]) -> AuthResult {
    AuthResult {
        status_code: STATUS_OK,
        errors: Vec::new(),
        session_id: session_id.to_string(),
        contracts: contracts
            .iter()
            .map(|(id, number)| Contract {
                id: id.to_string(),
                number: number.to_string(),
            })
            .collect(),
    }
}

pub fn balance(status_code: i64, balance: &str) -> BalanceResult {
    BalanceResult {
        status_code,
        errors: Vec::new(),
        balance: balance.to_string(),
    }
}

/// Answers authentication calls from a script, counting them.
pub struct FakeAuth {
    answers: Mutex<VecDeque<AuthResult>>,
    calls: Mutex<usize>,
}

impl FakeAuth {
    pub fn new(answers: Vec<AuthResult>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl AuthGateway for FakeAuth {
    fn authenticate(&self, _config: &AppConfig) -> Result<AuthResult> {
        *self.calls.lock() += 1;
        Ok(self
            .answers
            .lock()
            .pop_front()
            .expect("unexpected authentication call"))
    }
}

/// Answers balance calls from a script, recording the sessions used.
pub struct FakeBalance {
    answers: Mutex<VecDeque<BalanceResult>>,
    sessions: Mutex<Vec<SessionInfo>>,
}

impl FakeBalance {
    pub fn new(answers: Vec<BalanceResult>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            sessions: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn sessions(&self) -> Vec<SessionInfo> {
        self.sessions.lock().clone()
    }
}

impl BalanceGateway for FakeBalance {
    fn fetch_balance(&self, _config: &AppConfig, session: &SessionInfo) -> Result<BalanceResult> {
        self.sessions.lock().push(session.clone());
        Ok(self
            .answers
            .lock()
            .pop_front()
            .expect("unexpected balance call"))
    }
}
