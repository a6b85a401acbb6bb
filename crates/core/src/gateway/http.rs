use std::time::Duration;

use reqwest::{
    blocking::{Client, RequestBuilder},
    Url,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::{AuthGateway, BalanceGateway};
use crate::{
    config::AppConfig,
    error::{BalanceError, ConfigError, Result},
    models::{ApiError, AuthResult, BalanceResult, Contract, SessionInfo},
};

const AUTH_PATH: &str = "/vip/v1/authUser";
const BALANCE_PATH: &str = "/vip/v1/getPartContractData";

const AUTH_ENDPOINT: &str = "authUser";
const BALANCE_ENDPOINT: &str = "getPartContractData";

#[derive(Debug, Default, Deserialize)]
struct Status {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    status: Status,
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthData {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    contracts: Vec<Contract>,
}

#[derive(Debug, Default, Deserialize)]
struct BalanceData {
    #[serde(default, alias = "balanceData")]
    balance_data: BalanceBody,
}

#[derive(Debug, Default, Deserialize)]
struct BalanceBody {
    #[serde(default)]
    balance: String,
}

/// Talks to the billing API with a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
}

impl HttpGateway {
    /// Build a gateway whose calls are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| BalanceError::Transport {
                endpoint: "client",
                source,
            })?;
        Ok(Self { client })
    }

    /// Build a gateway using the timeout from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.timeout())
    }

    fn send(&self, endpoint: &'static str, request: RequestBuilder) -> Result<String> {
        let transport = |source| BalanceError::Transport { endpoint, source };
        let response = request.send().map_err(transport)?;
        debug!("{endpoint} answered with HTTP {}", response.status());
        response.text().map_err(transport)
    }
}

impl AuthGateway for HttpGateway {
    fn authenticate(&self, config: &AppConfig) -> Result<AuthResult> {
        let url = endpoint_url(&config.api_site, AUTH_PATH)?;
        debug!("authenticating {} at {url}", config.login);
        let request = self
            .client
            .post(url)
            .header("api_key", &config.api_token)
            .form(&[
                ("login", config.login.as_str()),
                ("password", config.password.as_str()),
            ]);
        let body = self.send(AUTH_ENDPOINT, request)?;
        decode_auth(&body)
    }
}

impl BalanceGateway for HttpGateway {
    fn fetch_balance(&self, config: &AppConfig, session: &SessionInfo) -> Result<BalanceResult> {
        info!("requesting balance for contract id {}", session.contract_id);
        let url = endpoint_url(&config.api_site, BALANCE_PATH)?;
        let request = self
            .client
            .get(url)
            .query(&[("contract_id", session.contract_id.as_str())])
            .header("api_key", &config.api_token)
            .header("session_id", &session.session_id);
        let body = self.send(BALANCE_ENDPOINT, request)?;
        let result = decode_balance(&body)?;

        info!("balance status code: {}", result.status_code);
        for err in &result.errors {
            info!("server message: {}", err.message);
        }
        Ok(result)
    }
}

/// Replace the path of `site` with `path`, dropping any query or fragment.
pub(crate) fn endpoint_url(site: &str, path: &str) -> Result<Url> {
    let mut url = Url::parse(site).map_err(|err| ConfigError::InvalidValue {
        field: "api_site",
        reason: err.to_string(),
    })?;
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Decode an authentication answer.
pub fn decode_auth(body: &str) -> Result<AuthResult> {
    let envelope: Envelope<AuthData> =
        serde_json::from_str(body).map_err(|source| BalanceError::Decode {
            endpoint: AUTH_ENDPOINT,
            source,
        })?;
    let data = envelope.data.unwrap_or_default();
    Ok(AuthResult {
        status_code: envelope.status.code,
        errors: envelope.status.errors,
        session_id: data.session_id,
        contracts: data.contracts,
    })
}

/// Decode a balance answer.
pub fn decode_balance(body: &str) -> Result<BalanceResult> {
    let envelope: Envelope<BalanceData> =
        serde_json::from_str(body).map_err(|source| BalanceError::Decode {
            endpoint: BALANCE_ENDPOINT,
            source,
        })?;
    let data = envelope.data.unwrap_or_default();
    Ok(BalanceResult {
        status_code: envelope.status.code,
        errors: envelope.status.errors,
        balance: data.balance_data.balance,
    })
}
