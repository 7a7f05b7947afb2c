//! DaprBindingStorage - Dapr output binding 経由の保存
//!
//! sidecar の HTTP API を叩く:
//! `POST {endpoint}/v1.0/bindings/{name}` に
//! `{"data": ..., "metadata": {...}, "operation": "create"}` を送る。
//! binding 側（Azure Blob Storage など）の設定は sidecar の component に任せる。

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::{BindingOperation, BindingResponse, StorageRequest};
use crate::ports::{BindingError, StoragePort};

/// Default sidecar address (`DAPR_HTTP_PORT` defaults to 3500).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3500";

const API_TOKEN_HEADER: &str = "dapr-api-token";
const RESPONSE_METADATA_PREFIX: &str = "metadata.";

#[derive(Serialize)]
struct InvokeBindingBody<'a> {
    data: serde_json::Value,
    metadata: &'a BTreeMap<String, String>,
    operation: BindingOperation,
}

pub struct DaprBindingStorage {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<Secret<String>>,
}

impl DaprBindingStorage {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, BindingError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| BindingError::Unavailable(format!("failed to build http client: {e}")))?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            client,
            endpoint,
            api_token: None,
        }
    }

    pub fn with_api_token(mut self, token: Secret<String>) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn binding_url(&self, name: &str) -> String {
        format!("{}/v1.0/bindings/{}", self.endpoint, name)
    }
}

/// JSON payload はそのまま埋め込み、それ以外は文字列として送る
fn payload_value(payload: &[u8]) -> serde_json::Value {
    serde_json::from_slice(payload)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(payload).into_owned()))
}

/// Dapr error bodies look like `{"errorCode": "...", "message": "..."}`.
fn error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct DaprErrorBody {
        message: String,
    }
    match serde_json::from_slice::<DaprErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

fn is_transient(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
}

#[async_trait]
impl StoragePort for DaprBindingStorage {
    async fn store(&self, request: StorageRequest) -> Result<BindingResponse, BindingError> {
        let name = request.container.as_str();
        let body = InvokeBindingBody {
            data: payload_value(&request.payload),
            metadata: &request.metadata,
            operation: request.operation,
        };

        let mut call = self.client.post(self.binding_url(name)).json(&body);
        if let Some(token) = &self.api_token {
            call = call.header(API_TOKEN_HEADER, token.expose_secret());
        }

        let resp = call.send().await.map_err(|e| {
            BindingError::Unavailable(format!("error invoking output binding {name}: {e}"))
        })?;

        let status = resp.status();
        let metadata: BTreeMap<String, String> = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                let key = k.as_str().strip_prefix(RESPONSE_METADATA_PREFIX)?;
                Some((key.to_string(), v.to_str().ok()?.to_string()))
            })
            .collect();
        let data = resp.bytes().await.map_err(|e| {
            BindingError::Unavailable(format!("error reading output binding {name} response: {e}"))
        })?;

        if status.is_success() {
            return Ok(BindingResponse {
                data: data.to_vec(),
                metadata,
            });
        }

        let message = format!(
            "error invoking output binding {name}: {status}: {}",
            error_message(&data)
        );
        debug!(binding = name, %status, "output binding call failed");
        if is_transient(status) {
            Err(BindingError::Unavailable(message))
        } else {
            Err(BindingError::Rejected(message))
        }
    }

    fn backend(&self) -> &'static str {
        "dapr"
    }
}
