use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;
use wreq::Client;

use crate::error::{self, FlightError};
use crate::query::SearchParams;

const DEFAULT_HOST: &str = "https://test.api.amadeus.com";

// Tokens within this margin of expiry are treated as stale.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct FetchOptions {
    pub host: Option<String>,
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            host: None,
            proxy: None,
            timeout: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, FlightError> {
        Ok(Self {
            client_id: require_env("AMADEUS_CLIENT_ID")?,
            client_secret: require_env("AMADEUS_CLIENT_SECRET")?,
        })
    }
}

fn require_env(name: &str) -> Result<String, FlightError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| FlightError::MissingCredential(name.to_string()))
}

#[derive(Debug)]
struct TokenState {
    access_token: String,
    expires_at: Instant,
}

/// Expiry-aware bearer-token cache, owned by whoever constructs the client
/// rather than living in process-global state.
#[derive(Debug, Default)]
pub struct TokenCache {
    state: Mutex<Option<TokenState>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh(&self) -> Option<String> {
        let state = self.state.lock().expect("token cache lock");
        state
            .as_ref()
            .filter(|s| s.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN)
            .map(|s| s.access_token.clone())
    }

    fn store(&self, access_token: String, expires_in: u64) {
        let mut state = self.state.lock().expect("token cache lock");
        *state = Some(TokenState {
            access_token,
            expires_at: Instant::now() + Duration::from_secs(expires_in),
        });
    }
}

pub struct AmadeusClient {
    client: Client,
    host: String,
    credentials: Credentials,
    tokens: TokenCache,
}

impl AmadeusClient {
    pub fn new(
        credentials: Credentials,
        tokens: TokenCache,
        options: &FetchOptions,
    ) -> Result<Self, FlightError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(options.timeout));

        if let Some(ref proxy) = options.proxy {
            builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
        }

        let client = builder.build().map_err(error::from_http_error)?;

        let host = options
            .host
            .clone()
            .or_else(|| std::env::var("AMADEUS_HOST").ok().filter(|h| !h.is_empty()))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(Self {
            client,
            host,
            credentials,
            tokens,
        })
    }

    async fn access_token(&self) -> Result<String, FlightError> {
        if let Some(token) = self.tokens.fresh() {
            return Ok(token);
        }

        let response = self
            .client
            .post(format!("{}/v1/security/oauth2/token", self.host))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        match status {
            200 => {}
            429 => return Err(FlightError::RateLimited),
            401 | 403 => return Err(FlightError::InvalidCredentials(status)),
            _ => return Err(FlightError::HttpStatus(status)),
        }

        let body = response.text().await.map_err(error::from_http_error)?;
        let json: Value =
            serde_json::from_str(&body).map_err(|e| FlightError::JsonParse(e.to_string()))?;

        let access_token = json
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| FlightError::JsonParse("token response missing access_token".into()))?
            .to_string();
        let expires_in = json.get("expires_in").and_then(Value::as_u64).unwrap_or(0);

        self.tokens.store(access_token.clone(), expires_in);
        Ok(access_token)
    }

    async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value, FlightError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .get(format!("{}{}", self.host, path))
            .query(params)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        match status {
            200 => {}
            429 => return Err(FlightError::RateLimited),
            401 | 403 => return Err(FlightError::InvalidCredentials(status)),
            _ if status >= 400 => return Err(FlightError::HttpStatus(status)),
            _ => {}
        }

        let body = response.text().await.map_err(error::from_http_error)?;
        serde_json::from_str(&body).map_err(|e| FlightError::JsonParse(e.to_string()))
    }

    pub async fn flight_offers(&self, params: &SearchParams) -> Result<Value, FlightError> {
        self.get_json("/v2/shopping/flight-offers", &params.to_query_params())
            .await
    }

    pub async fn locations(&self, keyword: &str) -> Result<Value, FlightError> {
        let params = vec![
            ("keyword".to_string(), keyword.to_string()),
            ("subType".to_string(), "AIRPORT,CITY".to_string()),
            ("page[limit]".to_string(), "10".to_string()),
            ("view".to_string(), "LIGHT".to_string()),
        ];
        self.get_json("/v1/reference-data/locations", &params).await
    }
}
