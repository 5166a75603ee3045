use reqwest::{Client, Method, header};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::ApiResponse;

#[derive(Debug, Serialize)]
struct PostRequestDto<'a, B: Serialize> {
    path: &'a str,
    api_key: &'a str,
    data: &'a B,
}

#[derive(Serialize)]
struct GetQuery<'a> {
    path: &'a str,
    api_key: &'a str,
}

#[derive(Debug, Clone)]
/// Access layer for the spreadsheet-backed endpoint.
///
/// Every call performs exactly one HTTP round trip and unwraps the
/// `{success, data, error}` envelope. Nothing is retried.
pub struct SheetsClient {
    endpoint_url: Option<String>,
    api_key: Option<String>,
    client: Client,
}

impl SheetsClient {
    /// Creates the access layer from the startup configuration.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::Configuration(format!("failed to build http client: {err}")))?;

        Ok(Self {
            endpoint_url: config.endpoint_url.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    fn credentials(&self) -> ApiResult<(&str, &str)> {
        let endpoint = self
            .endpoint_url
            .as_deref()
            .ok_or_else(|| ApiError::Configuration("APP_SCRIPT_URL is not set".to_string()))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::Configuration("API_KEY is not set".to_string()))?;
        Ok((endpoint, api_key))
    }

    /// Reads the resource at `path` (`GET ?path=<path>&api_key=<key>`).
    pub async fn get_data<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let result = self.fetch_get(path).await;
        if let Err(err) = &result {
            tracing::error!(path, error = %err, "get_data failed");
        }
        result
    }

    /// Writes `body` to the resource at `path` (`POST {path, api_key, data}`).
    pub async fn post_data<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let result = self.fetch_post(path, body).await;
        if let Err(err) = &result {
            tracing::error!(path, error = %err, "post_data failed");
        }
        result
    }

    /// Writes `body` and trusts the envelope's `success` flag alone.
    ///
    /// The stored record comes back when `data` decodes as `T`; any other
    /// payload shape is logged and yields `None`, since the write already
    /// happened.
    pub async fn post_write<T, B>(&self, path: &str, body: &B) -> ApiResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let data: Value = self.post_data(path, body).await?;
        Ok(decode_written(path, data))
    }

    async fn fetch_get<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let (endpoint, api_key) = self.credentials()?;
        tracing::debug!(path, "GET spreadsheet endpoint");

        let request = self
            .client
            .request(Method::GET, endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .query(&GetQuery { path, api_key });

        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        Self::decode_envelope(response).await
    }

    async fn fetch_post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let (endpoint, api_key) = self.credentials()?;
        tracing::debug!(path, "POST spreadsheet endpoint");

        let payload = PostRequestDto {
            path,
            api_key,
            data: body,
        };
        let request = self.client.request(Method::POST, endpoint).json(&payload);

        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        Self::decode_envelope(response).await
    }

    async fn decode_envelope<T>(response: reqwest::Response) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_http_status(status));
        }

        let bytes = response.bytes().await.map_err(ApiError::from_reqwest)?;
        let envelope: ApiResponse<Value> =
            serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))?;
        unwrap_envelope(envelope)
    }
}

/// Turns a raw envelope into the typed payload.
///
/// A success envelope without `data` is decoded as JSON `null`, so payload
/// types that accept `null` (`()`, `Option<_>`) still succeed.
pub(crate) fn unwrap_envelope<T>(envelope: ApiResponse<Value>) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    if !envelope.success {
        return Err(ApiError::logical(envelope.error));
    }

    let data = envelope.data.unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|err| ApiError::Decode(err.to_string()))
}

fn decode_written<T>(path: &str, data: Value) -> Option<T>
where
    T: DeserializeOwned,
{
    if data.is_null() {
        return None;
    }
    match serde_json::from_value(data) {
        Ok(saved) => Some(saved),
        Err(err) => {
            tracing::warn!(path, error = %err, "write accepted with unexpected payload");
            None
        }
    }
}
