//! HTTP implementation of the submission API

use crate::api::SubmissionApi;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::{CurrentUser, Submission};
use crate::workflow::SubmissionPhase;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Submission API client using reqwest
pub struct HttpSubmissionApi {
    client: Client,
    config: ApiConfig,
}

#[derive(Serialize)]
struct SendBackPayload<'a> {
    target_phase: SubmissionPhase,
    reason: &'a str,
}

impl HttpSubmissionApi {
    /// Create a client for the configured API
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// The configuration this client was built with
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.config.endpoint(path)?;
        debug!(%method, %url, "API request");

        let mut req = self.client.request(method, url);
        if let Some(token) = &self.config.token {
            req = req.header(AUTHORIZATION, format!("Token {token}"));
        }
        Ok(req)
    }

    /// Send a request and decode the JSON body, mapping failure statuses
    ///
    /// `submission` names the submission being addressed so a 404 can be
    /// reported as `SubmissionNotFound`.
    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        submission: Option<u64>,
    ) -> Result<T> {
        let response = req.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };

        match (status, submission) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(Error::SubmissionNotFound(id)),
            (StatusCode::UNAUTHORIZED, _) => Err(Error::Auth(message)),
            _ => Err(Error::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl SubmissionApi for HttpSubmissionApi {
    async fn get_submission(&self, id: u64) -> Result<Submission> {
        let req = self.request(Method::GET, &format!("submissions/{id}/"))?;
        self.send(req, Some(id)).await
    }

    async fn list_submissions(&self, phase: Option<SubmissionPhase>) -> Result<Vec<Submission>> {
        let mut req = self.request(Method::GET, "submissions/")?;
        if let Some(phase) = phase {
            req = req.query(&[("phase", phase.as_str())]);
        }
        self.send(req, None).await
    }

    async fn advance_phase(&self, id: u64) -> Result<Submission> {
        let req = self.request(Method::POST, &format!("submissions/{id}/advance_phase/"))?;
        self.send(req, Some(id)).await
    }

    async fn send_back(
        &self,
        id: u64,
        target: SubmissionPhase,
        reason: &str,
    ) -> Result<Submission> {
        let req = self
            .request(Method::POST, &format!("submissions/{id}/send_back/"))?
            .json(&SendBackPayload {
                target_phase: target,
                reason,
            });
        self.send(req, Some(id)).await
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        let req = self.request(Method::GET, "auth/user/")?;
        self.send(req, None).await
    }
}
