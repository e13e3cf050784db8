//! `reqwest` implementation of the game API port.

use std::time::Duration;

use kh_app::ports::GameApi;
use kh_domain::api::wire::{
    Ack, CommandReply, CommandRequest, EmptyBody, EventsReply, LoginReply, LoginRequest,
    StateReply,
};
use kh_domain::api::{self, ApiBase, Endpoint, Method};
use kh_domain::error::KhError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Upper bound on a single request, connection included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const JSON: &str = "application/json";

/// Game API client over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestGameApi {
    client: reqwest::Client,
    base: ApiBase,
}

impl ReqwestGameApi {
    /// Create a client for the server under `base` with [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`KhError::Transport`] if the HTTP client cannot be built.
    pub fn new(base: ApiBase) -> Result<Self, KhError> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`KhError::Transport`] if the HTTP client cannot be built.
    pub fn with_timeout(base: ApiBase, timeout: Duration) -> Result<Self, KhError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| KhError::Transport(format!("building HTTP client: {err}")))?;
        Ok(Self { client, base })
    }

    #[must_use]
    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    async fn call<B, T>(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, KhError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let method = endpoint.method();
        let url = self.base.endpoint_url(endpoint);
        tracing::debug!(%method, %url, "sending request");

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        }
        .header(CONTENT_TYPE, JSON);

        if endpoint.requires_auth() {
            let token = token.ok_or(KhError::NotLoggedIn)?;
            request = request.header(AUTHORIZATION, api::bearer(token));
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| KhError::Transport(format!("{method} {url} failed: {err}")))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| KhError::Transport(format!("reading response body: {err}")))?;

        tracing::debug!(%method, %url, status, bytes = bytes.len(), "received response");
        api::decode(status, &bytes)
    }
}

impl GameApi for ReqwestGameApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginReply, KhError> {
        let body = LoginRequest { username, password };
        self.call(Endpoint::Login, None, &[], Some(&body)).await
    }

    async fn logout(&self, token: &str) -> Result<(), KhError> {
        self.call::<_, Ack>(Endpoint::Logout, Some(token), &[], Some(&EmptyBody::default()))
            .await
            .map(|_| ())
    }

    async fn fetch_state(&self, token: &str) -> Result<StateReply, KhError> {
        self.call::<EmptyBody, _>(Endpoint::State, Some(token), &[], None)
            .await
    }

    async fn send_command(&self, token: &str, command: &str) -> Result<CommandReply, KhError> {
        let body = CommandRequest { command };
        self.call(Endpoint::Command, Some(token), &[], Some(&body))
            .await
    }

    async fn fetch_history(&self, token: &str, limit: Option<u32>) -> Result<EventsReply, KhError> {
        let query: Vec<(&str, String)> = limit
            .map(|limit| ("limit", limit.to_string()))
            .into_iter()
            .collect();
        self.call::<EmptyBody, _>(Endpoint::Events, Some(token), &query, None)
            .await
    }
}
