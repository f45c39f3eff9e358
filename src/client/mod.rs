//! Async HTTP client for the backend REST API.
//!
//! All endpoints live under `/api/v1`. Responses are mapped once, here:
//! 401 becomes [`Error::Unauthorized`], other non-2xx become [`Error::Api`]
//! with the response body as the message. No retries, no request queuing.

mod orders;
mod products;

pub use orders::{
    CancelRequest, HttpOrderRepository, OrderRepository, RefundRequest, ReturnRequest,
    StatusChangeRequest,
};
pub use products::{
    BulkProductUpdate, BulkUpdate, CreateProduct, ListParams, Paginated, ProductClient,
};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.config.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.http.get(self.url(path))).await
    }

    pub(crate) async fn get_json_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.check(self.dispatch(self.http.delete(self.url(path))).await?)
            .await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = self.check(self.dispatch(request).await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn dispatch(&self, mut request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("backend rejected credentials, operator must log in again");
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %message, "backend request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

/// Runs a payload's validator rules, surfacing failures as local validation
/// errors before any request is made.
pub(crate) fn validated<T: Validate>(payload: T) -> Result<T> {
    payload
        .validate()
        .map_err(|e| Error::Validation(e.to_string()))?;
    Ok(payload)
}
