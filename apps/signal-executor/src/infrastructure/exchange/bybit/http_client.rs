//! Signed HTTP client for the Bybit V5 REST API.
//!
//! Requests are sent once. There are no retries: a failed call surfaces to
//! the sequencer, which decides whether the symbol continues.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api_types::BybitEnvelope;
use super::config::BybitConfig;
use super::error::BybitError;
use super::signer::RequestSigner;

const HEADER_API_KEY: &str = "X-BAPI-API-KEY";
const HEADER_TIMESTAMP: &str = "X-BAPI-TIMESTAMP";
const HEADER_SIGN: &str = "X-BAPI-SIGN";
const HEADER_RECV_WINDOW: &str = "X-BAPI-RECV-WINDOW";

/// HTTP client for the Bybit API.
#[derive(Debug, Clone)]
pub struct BybitHttpClient {
    client: Client,
    base_url: String,
    signer: RequestSigner,
}

impl BybitHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &BybitConfig) -> Result<Self, BybitError> {
        if !config.has_credentials() {
            return Err(BybitError::MissingCredentials);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BybitError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            signer: RequestSigner::new(
                config.api_key.clone(),
                config.api_secret.clone(),
                config.recv_window_ms,
            ),
        })
    }

    /// Make a signed GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, BybitError> {
        let query_string = query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let url = if query_string.is_empty() {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}{path}?{query_string}", self.base_url)
        };

        let request = self.signed(self.client.get(&url), &query_string)?;
        Self::send(request, path).await
    }

    /// Make a signed POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BybitError> {
        let json = serde_json::to_string(body).map_err(|e| BybitError::JsonParse(e.to_string()))?;
        let url = format!("{}{path}", self.base_url);

        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json");
        let request = self.signed(request, &json)?.body(json);
        Self::send(request, path).await
    }

    fn signed(&self, request: RequestBuilder, payload: &str) -> Result<RequestBuilder, BybitError> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let sign = self.signer.sign(timestamp, payload)?;
        Ok(request
            .header(HEADER_API_KEY, self.signer.api_key())
            .header(HEADER_TIMESTAMP, timestamp.to_string())
            .header(HEADER_SIGN, sign)
            .header(HEADER_RECV_WINDOW, self.signer.recv_window_ms().to_string()))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder, path: &str) -> Result<T, BybitError> {
        let response = request
            .send()
            .await
            .map_err(|e| BybitError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BybitError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "Bybit HTTP error");
            return Err(BybitError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: BybitEnvelope =
            serde_json::from_str(&text).map_err(|e| BybitError::JsonParse(e.to_string()))?;

        if envelope.ret_code != 0 {
            tracing::debug!(
                path,
                code = envelope.ret_code,
                message = %envelope.ret_msg,
                "Bybit API rejection"
            );
            return Err(BybitError::Api {
                code: envelope.ret_code,
                message: envelope.ret_msg,
            });
        }

        serde_json::from_value(envelope.result).map_err(|e| BybitError::JsonParse(e.to_string()))
    }
}
