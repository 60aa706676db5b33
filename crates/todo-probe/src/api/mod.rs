//! REST action wrapper for the to-do service.
//!
//! One method per endpoint, one HTTP request per call. The raw
//! [`reqwest::Response`] is handed back untouched so tests can inspect status
//! and body themselves.
//!
//! # Verification
//!
//! Methods taking `verify: bool` return [`ProbeError::UnexpectedStatus`] when
//! the flag is set and the status is not 200. Negative tests pass `false` and
//! assert on the returned status instead. Read-only endpoints always verify.
//!
//! ```ignore
//! let api = TodoApi::new("http://localhost:8080/")?;
//! api.reset().await?;
//! let params = params::task_creation_params("title", &["tag"]);
//! let rsp = api.create_task(&params, &Auth::None, false).await?;
//! assert_eq!(rsp.status(), 401);
//! ```

mod auth;
pub mod params;

pub use auth::{auth_header, encode_token, Auth, Credentials};

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde_json::Value;
use std::fmt::Display;
use tracing::{debug, warn};

use crate::result::{ProbeError, ProbeResult};

const TAGS: &str = "tags";
const USERS: &str = "users";
const AUTHENTICATE: &str = "authenticate";
const RESET: &str = "reset";

/// Typed REST actions against one deployment of the service
#[derive(Debug, Clone)]
pub struct TodoApi {
    base_url: Url,
    client: Client,
}

impl TodoApi {
    /// Create a wrapper for the service rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> ProbeResult<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a wrapper with a custom reqwest client
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if `base_url` is not an absolute URL.
    pub fn with_client(base_url: &str, client: Client) -> ProbeResult<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized)
            .map_err(|e| ProbeError::config(format!("invalid base URL '{base_url}': {e}")))?;
        Ok(Self { base_url, client })
    }

    /// Base URL, always ending in `/`
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /`: list every task
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-200 status.
    pub async fn list_tasks(&self) -> ProbeResult<Response> {
        let request = self.request(Method::GET, "")?;
        self.send("get", request, true).await
    }

    /// `GET /{id}`: one task
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-200 status.
    pub async fn task_detail(&self, task_id: impl Display) -> ProbeResult<Response> {
        let request = self.request(Method::GET, &task_id.to_string())?;
        self.send("get", request, true).await
    }

    /// `PUT /`: create a task
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, or a non-200 status when `verify` is set.
    pub async fn create_task(&self, params: &Value, auth: &Auth, verify: bool) -> ProbeResult<Response> {
        let request = auth.apply(self.request(Method::PUT, "")?).json(params);
        self.send("put", request, verify).await
    }

    /// `PATCH /{id}`: modify a task
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, or a non-200 status when `verify` is set.
    pub async fn modify_task(
        &self,
        task_id: impl Display,
        params: &Value,
        auth: &Auth,
        verify: bool,
    ) -> ProbeResult<Response> {
        let request = auth
            .apply(self.request(Method::PATCH, &task_id.to_string())?)
            .json(params);
        self.send("patch", request, verify).await
    }

    /// `DELETE /{id}`: delete a task
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, or a non-200 status when `verify` is set.
    pub async fn delete_task(&self, task_id: impl Display, auth: &Auth, verify: bool) -> ProbeResult<Response> {
        let request = auth.apply(self.request(Method::DELETE, &task_id.to_string())?);
        self.send("delete", request, verify).await
    }

    /// `GET /tags`: tag name to detail
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-200 status.
    pub async fn list_tags(&self) -> ProbeResult<Response> {
        let request = self.request(Method::GET, TAGS)?;
        self.send("get", request, true).await
    }

    /// `GET /tags/{id}`: tag name and linked task titles
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-200 status.
    pub async fn tag_detail(&self, tag_id: impl Display) -> ProbeResult<Response> {
        let request = self.request(Method::GET, &format!("{TAGS}/{tag_id}"))?;
        self.send("get", request, true).await
    }

    /// `POST /users`: register a user
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, or a non-200 status when `verify` is set.
    pub async fn create_user(&self, data: &Value, verify: bool) -> ProbeResult<Response> {
        let request = self.request(Method::POST, USERS)?.json(data);
        self.send("post", request, verify).await
    }

    /// `POST /authenticate`: exchange credentials for a token
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, or a non-200 status when `verify` is set.
    pub async fn authenticate(&self, data: &Value, verify: bool) -> ProbeResult<Response> {
        let request = self.request(Method::POST, AUTHENTICATE)?.json(data);
        self.send("post", request, verify).await
    }

    /// `GET /reset`: wipe server-side state
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-200 status.
    pub async fn reset(&self) -> ProbeResult<Response> {
        let request = self.request(Method::GET, RESET)?;
        self.send("get", request, true).await
    }

    fn request(&self, method: Method, path: &str) -> ProbeResult<reqwest::RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ProbeError::config(format!("cannot join '{path}' onto {}: {e}", self.base_url)))?;
        Ok(self.client.request(method, url))
    }

    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
        verify: bool,
    ) -> ProbeResult<Response> {
        let request = request.build()?;
        let url = request.url().clone();
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "Failed to retrieve");
                return Err(e.into());
            }
        };
        debug!(operation, %url, status = response.status().as_u16(), "response");

        if verify && response.status() != StatusCode::OK {
            return Err(ProbeError::UnexpectedStatus {
                operation,
                expected: StatusCode::OK.as_u16(),
                actual: response.status().as_u16(),
            });
        }
        Ok(response)
    }
}
