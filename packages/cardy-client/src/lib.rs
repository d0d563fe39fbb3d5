//! REST client for the Cardy banking assistant backend
//!
//! Wraps the seven JSON endpoints of the assistant service and normalizes
//! every failure into an [`ApiError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cardy_client::{BankApi, CardyClient};
//!
//! let client = CardyClient::from_env();
//!
//! let health = client.check_health().await?;
//! let account = client.fetch_account_details("9876543210").await?;
//! if let Some(record) = account.into_data() {
//!     println!("{:?}", record.holder_name);
//! }
//! ```

pub mod api;
pub mod error;
pub mod types;

pub use api::BankApi;
pub use error::{ApiError, Result};
pub use types::*;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Backend paths, relative to the base URL.
pub mod endpoints {
    pub const HEALTH: &str = "/api/health";
    pub const ACCOUNT_DETAILS: &str = "/api/account/details";
    pub const LOGIN: &str = "/api/auth/login";
    pub const CHAT_QUERY: &str = "/api/chat/query";
    pub const LOAN_INFO: &str = "/api/info/loans";
    pub const BRANCH_INFO: &str = "/api/info/branches";
    pub const CONTACT_INFO: &str = "/api/info/contact";
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// HTTP client for the assistant backend.
#[derive(Clone)]
pub struct CardyClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

impl CardyClient {
    /// Create a client for the given base URL with the default 30s timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variable `CARDY_API_URL`, falling back to
    /// the local development server.
    pub fn from_env() -> Self {
        let url = std::env::var("CARDY_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(url)
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.send::<(), R>(Method::GET, path, None).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        debug!(method = %method, path, "API request");

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(self.timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = ApiError::from(e);
            warn!(method = %method, path, status = err.status(), error = %err, "API request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let data = serde_json::from_str::<Value>(&text).unwrap_or(if text.is_empty() {
                Value::Null
            } else {
                Value::String(text)
            });
            let err = ApiError::from_server(status.as_u16(), data);
            warn!(
                method = %method,
                path,
                status = status.as_u16(),
                error = %err,
                "API error response"
            );
            return Err(err);
        }

        let decoded = response.json::<R>().await.map_err(|e| {
            let err = ApiError::from(e);
            warn!(method = %method, path, error = %err, "API response could not be read");
            err
        })?;

        debug!(
            method = %method,
            path,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis(),
            "API response"
        );

        Ok(decoded)
    }
}

#[async_trait]
impl BankApi for CardyClient {
    async fn check_health(&self) -> Result<HealthReport> {
        self.get(endpoints::HEALTH).await
    }

    async fn fetch_account_details(&self, mobile_number: &str) -> Result<ApiEnvelope<AccountRecord>> {
        self.post(endpoints::ACCOUNT_DETAILS, &MobileNumberRequest { mobile_number })
            .await
    }

    async fn login_with_phone(&self, mobile_number: &str) -> Result<ApiEnvelope<LoginProfile>> {
        self.post(endpoints::LOGIN, &MobileNumberRequest { mobile_number })
            .await
    }

    async fn send_chat_query(
        &self,
        query: &str,
        user_context: Option<&UserContext>,
    ) -> Result<ChatReply> {
        self.post(endpoints::CHAT_QUERY, &ChatQueryRequest { query, user_context })
            .await
    }

    async fn get_loan_info(&self) -> Result<ApiEnvelope<LoanInfo>> {
        self.get(endpoints::LOAN_INFO).await
    }

    async fn get_branch_info(&self) -> Result<ApiEnvelope<BranchInfo>> {
        self.get(endpoints::BRANCH_INFO).await
    }

    async fn get_contact_info(&self) -> Result<ApiEnvelope<ContactInfo>> {
        self.get(endpoints::CONTACT_INFO).await
    }
}
