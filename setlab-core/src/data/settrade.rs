//! Settrade Open API data provider.
//!
//! Fetches daily OHLCV candlesticks from the Settrade open-api gateway.
//! A session is established once via the broker-app login endpoint; the
//! candlestick endpoint then takes bearer auth. Requests are made one at a
//! time with the client's default timeouts, no retries, and no rate
//! limiting; failures surface as structured [`DataError`] values and are
//! handled per symbol by the pipeline.

use super::provider::{CandleQuery, CandleResponse, DataError, MarketDataProvider};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://open-api.settrade.com";

/// Broker-app credentials for the open-api gateway.
///
/// The sandbox broker accepts any registered app; production brokers issue
/// their own broker id and app code.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
    pub broker_id: String,
    pub app_code: String,
}

impl Credentials {
    /// Sandbox credentials: broker id and app code both SANDBOX.
    pub fn sandbox(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            broker_id: "SANDBOX".into(),
            app_code: "SANDBOX".into(),
        }
    }

    /// Read credentials from `SETTRADE_APP_ID` / `SETTRADE_APP_SECRET`,
    /// with `SETTRADE_BROKER_ID` / `SETTRADE_APP_CODE` defaulting to SANDBOX.
    pub fn from_env() -> Result<Self, DataError> {
        let app_id = std::env::var("SETTRADE_APP_ID")
            .map_err(|_| DataError::AuthenticationFailed("SETTRADE_APP_ID is not set".into()))?;
        let app_secret = std::env::var("SETTRADE_APP_SECRET").map_err(|_| {
            DataError::AuthenticationFailed("SETTRADE_APP_SECRET is not set".into())
        })?;
        let mut credentials = Self::sandbox(app_id, app_secret);
        if let Ok(broker_id) = std::env::var("SETTRADE_BROKER_ID") {
            credentials.broker_id = broker_id;
        }
        if let Ok(app_code) = std::env::var("SETTRADE_APP_CODE") {
            credentials.app_code = app_code;
        }
        Ok(credentials)
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Settrade Open API provider. Holds the session token for its lifetime;
/// token refresh is out of scope for a single batch run.
pub struct SettradeProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    broker_id: String,
    access_token: String,
}

impl SettradeProvider {
    /// Log in against the production gateway.
    pub fn login(credentials: &Credentials) -> Result<Self, DataError> {
        Self::login_at(DEFAULT_BASE_URL, credentials)
    }

    /// Log in against a specific gateway host (tests point this at a stub).
    pub fn login_at(base_url: &str, credentials: &Credentials) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("setlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        let url = login_url(base_url, credentials);
        let resp = client
            .post(&url)
            .json(&serde_json::json!({
                "app_id": credentials.app_id,
                "app_secret": credentials.app_secret,
            }))
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    DataError::NetworkUnreachable(e.to_string())
                } else {
                    DataError::Other(e.to_string())
                }
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DataError::AuthenticationFailed(format!(
                "login rejected for app {}",
                credentials.app_id
            )));
        }
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} during login")));
        }

        let login: LoginResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse login response: {e}"))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            broker_id: credentials.broker_id.clone(),
            access_token: login.access_token,
        })
    }

    fn candle_url(&self, symbol: &str, query: &CandleQuery) -> String {
        format!(
            "{}/api/marketdata/v3/{}/instruments/{}/candlesticks\
             ?interval={}&startDateTime={}&endDateTime={}&normalized={}",
            self.base_url,
            self.broker_id,
            symbol,
            query.interval,
            query.start_param(),
            query.end_param(),
            query.normalized,
        )
    }
}

fn login_url(base_url: &str, credentials: &Credentials) -> String {
    format!(
        "{}/api/oam/v2/{}/broker-apps/{}/login",
        base_url.trim_end_matches('/'),
        credentials.broker_id,
        credentials.app_code,
    )
}

impl MarketDataProvider for SettradeProvider {
    fn name(&self) -> &str {
        "settrade_open_api"
    }

    fn candlesticks(
        &self,
        symbol: &str,
        query: &CandleQuery,
    ) -> Result<CandleResponse, DataError> {
        let url = self.candle_url(symbol, query);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    DataError::NetworkUnreachable(e.to_string())
                } else {
                    DataError::Other(e.to_string())
                }
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DataError::AuthenticationFailed(
                "candlestick request rejected (token expired?)".into(),
            ));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
        }

        resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!(
                "failed to parse candlestick response for {symbol}: {e}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query() -> CandleQuery {
        CandleQuery {
            start: NaiveDate::from_ymd_opt(2021, 8, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 8, 9)
                .unwrap()
                .and_hms_opt(23, 59, 0)
                .unwrap(),
            interval: "1d".into(),
            normalized: true,
        }
    }

    fn provider() -> SettradeProvider {
        SettradeProvider {
            client: reqwest::blocking::Client::new(),
            base_url: DEFAULT_BASE_URL.into(),
            broker_id: "SANDBOX".into(),
            access_token: "token".into(),
        }
    }

    #[test]
    fn sandbox_credentials_default_broker_and_app_code() {
        let credentials = Credentials::sandbox("my-app", "secret");
        assert_eq!(credentials.broker_id, "SANDBOX");
        assert_eq!(credentials.app_code, "SANDBOX");
        assert_eq!(credentials.app_id, "my-app");
    }

    #[test]
    fn login_url_includes_broker_and_app_code() {
        let credentials = Credentials::sandbox("my-app", "secret");
        assert_eq!(
            login_url("https://open-api.settrade.com/", &credentials),
            "https://open-api.settrade.com/api/oam/v2/SANDBOX/broker-apps/SANDBOX/login"
        );
    }

    #[test]
    fn candle_url_carries_all_query_parameters() {
        let url = provider().candle_url("PTT", &query());
        assert!(url.starts_with(
            "https://open-api.settrade.com/api/marketdata/v3/SANDBOX/instruments/PTT/candlesticks?"
        ));
        assert!(url.contains("interval=1d"));
        assert!(url.contains("startDateTime=2021-08-01T00:00:00"));
        assert!(url.contains("endDateTime=2024-08-09T23:59:00"));
        assert!(url.contains("normalized=true"));
    }
}
