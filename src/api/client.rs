use reqwest::{Client, Method, RequestBuilder, header};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::api::shared::ApiResponse;
use crate::config::Config;
use crate::error::{ClientError, ClientResult};

/// Thin typed wrapper over the ShiftLinkr REST API.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> ClientResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(token) = &config.api_token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::validation("API token contains invalid characters"))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path);
        self.required(path, self.execute(Method::GET, path, request).await?)
    }

    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).query(query);
        self.required(path, self.execute(Method::GET, path, request).await?)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        self.required(path, self.execute(Method::POST, path, request).await?)
    }

    /// POST without a body, e.g. toggle endpoints
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::POST, path);
        self.required(path, self.execute(Method::POST, path, request).await?)
    }

    pub async fn post_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        let request = self.request(Method::POST, path).json(body);
        self.execute::<Value>(Method::POST, path, request).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        self.required(path, self.execute(Method::PUT, path, request).await?)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path).json(body);
        self.required(path, self.execute(Method::PATCH, path, request).await?)
    }

    /// PATCH without a body or response payload, e.g. mark-as-read
    pub async fn patch_empty(&self, path: &str) -> ClientResult<()> {
        let request = self.request(Method::PATCH, path);
        self.execute::<Value>(Method::PATCH, path, request).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.request(Method::DELETE, path);
        self.execute::<Value>(Method::DELETE, path, request).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.api_url(path))
    }

    fn required<T>(&self, path: &str, data: Option<T>) -> ClientResult<T> {
        data.ok_or_else(|| ClientError::MissingData(path.to_string()))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ClientResult<Option<T>> {
        log::debug!("{} {}", method, path);

        let response = request.send().await.map_err(|err| {
            log::error!("{} {} failed: {}", method, path, err);
            ClientError::Network(err)
        })?;
        let status = response.status();
        let body = response.bytes().await?;

        log::debug!("{} {} -> {}", method, path, status);

        if !status.is_success() {
            let error = ClientError::from_response(status, &body);
            log::error!("{} {} returned {}: {}", method, path, status, error);
            return Err(error);
        }

        // 204 and friends
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope: ApiResponse<T> =
            serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
                path: path.to_string(),
                source,
            })?;

        if !envelope.success {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Request failed".to_string());
            log::error!("{} {} reported failure: {}", method, path, message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope.data)
    }
}
