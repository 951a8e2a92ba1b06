use serde_json::Value;
use std::env;
use std::fmt;
use std::time::Duration;

use engagement_audit::config::ProviderConfig;

/// Upstream failures keep enough shape for the server to tell "not found"
/// apart from transport problems and to relay the provider's status code.
#[derive(Debug)]
pub enum ProviderError {
    Request(String),
    Status { status: u16, body: String },
    Decode(String),
    MissingUser,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Request(message) => write!(f, "provider request failed: {}", message),
            ProviderError::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "provider error: {}", status)
                } else {
                    write!(f, "provider error: {} {}", status, body)
                }
            }
            ProviderError::Decode(message) => {
                write!(f, "provider response parse failed: {}", message)
            }
            ProviderError::MissingUser => write!(f, "provider response missing user data"),
        }
    }
}

#[derive(Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl ProviderClient {
    /// `None` when `TWITTERAPI_KEY` is unset; callers surface that as a
    /// configuration error rather than attempting unauthenticated calls.
    pub fn from_env(config: &ProviderConfig) -> Option<Self> {
        let api_key = env::var("TWITTERAPI_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .ok()?;

        Some(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub async fn fetch_user(&self, handle: &str) -> Result<Value, ProviderError> {
        let url = format!(
            "{}/user/info?userName={}",
            self.api_base,
            urlencoding::encode(handle)
        );
        let body = self.get_json(&url).await?;

        // Some provider variants nest the user under "data", others return
        // it at the top level, and "not found" can arrive as a 2xx with an
        // error field.
        let user = body.get("data").cloned().unwrap_or(body);
        match user {
            Value::Object(map) if !map.is_empty() && !map.contains_key("error") => {
                Ok(Value::Object(map))
            }
            _ => Err(ProviderError::MissingUser),
        }
    }

    pub async fn fetch_last_tweets(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Value>, ProviderError> {
        let url = format!(
            "{}/user/last_tweets?userId={}&limit={}",
            self.api_base,
            urlencoding::encode(user_id),
            limit
        );
        let body = self.get_json(&url).await?;

        let tweets = body
            .get("tweets")
            .or_else(|| body.get("data").and_then(|data| data.get("tweets")))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(tweets)
    }

    async fn get_json(&self, url: &str) -> Result<Value, ProviderError> {
        let response = self
            .client
            .get(url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await
            .map_err(|err| ProviderError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}
