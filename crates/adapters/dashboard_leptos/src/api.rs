//! Game server client wrapping `gloo-net` for calls under [`API_BASE`].

use gloo_net::http::{Request, RequestBuilder};
use kh_domain::api::wire::{
    Ack, CommandReply, CommandRequest, EmptyBody, LoginReply, LoginRequest, StateReply,
};
use kh_domain::api::{self, ApiBase, Endpoint, Method};
use kh_domain::error::KhError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Path prefix the page's game server is mounted under.
pub const API_BASE: &str = "/kh/api";

fn transport(err: gloo_net::Error) -> KhError {
    KhError::Transport(err.to_string())
}

/// Issue one request to `endpoint` and apply the envelope rules.
async fn api_json<B, T>(endpoint: Endpoint, token: Option<&str>, body: Option<&B>) -> Result<T, KhError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let url = ApiBase::new(API_BASE).endpoint_url(endpoint);
    let mut builder: RequestBuilder = match endpoint.method() {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
    }
    .header("Content-Type", "application/json");

    if endpoint.requires_auth() {
        let token = token.ok_or(KhError::NotLoggedIn)?;
        builder = builder.header("Authorization", &api::bearer(token));
    }

    let request = match body {
        Some(body) => builder.json(body).map_err(transport)?,
        None => builder.build().map_err(transport)?,
    };
    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let bytes = response.binary().await.map_err(transport)?;
    api::decode(status, &bytes)
}

pub async fn login(username: &str, password: &str) -> Result<LoginReply, KhError> {
    api_json(Endpoint::Login, None, Some(&LoginRequest { username, password })).await
}

pub async fn logout(token: &str) -> Result<(), KhError> {
    api_json::<_, Ack>(Endpoint::Logout, Some(token), Some(&EmptyBody::default()))
        .await
        .map(|_| ())
}

pub async fn fetch_state(token: &str) -> Result<StateReply, KhError> {
    api_json::<EmptyBody, _>(Endpoint::State, Some(token), None).await
}

pub async fn send_command(token: &str, command: &str) -> Result<CommandReply, KhError> {
    api_json(Endpoint::Command, Some(token), Some(&CommandRequest { command })).await
}
