//! Game API port — the server endpoints the client consumes.

use std::future::Future;

use kh_domain::api::wire::{CommandReply, EventsReply, LoginReply, StateReply};
use kh_domain::error::KhError;

/// Access to the game server.
///
/// Implementations perform one HTTP request per call and apply the
/// `{ok, error}` envelope rules (see [`kh_domain::api::decode`]), so a
/// returned `Ok` always means the server said `ok: true`.
pub trait GameApi: Send + Sync {
    /// `POST login`: exchange credentials for a session token.
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginReply, KhError>> + Send;

    /// `POST logout`: tell the server the session is over.
    fn logout(&self, token: &str) -> impl Future<Output = Result<(), KhError>> + Send;

    /// `GET state`: current snapshot plus self/peer records.
    fn fetch_state(&self, token: &str) -> impl Future<Output = Result<StateReply, KhError>> + Send;

    /// `POST command`: run a free-text command, returning its narrative.
    fn send_command(
        &self,
        token: &str,
        command: &str,
    ) -> impl Future<Output = Result<CommandReply, KhError>> + Send;

    /// `GET events`: recent commands and their narratives, newest first.
    fn fetch_history(
        &self,
        token: &str,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<EventsReply, KhError>> + Send;
}

impl<T: GameApi> GameApi for std::sync::Arc<T> {
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginReply, KhError>> + Send {
        (**self).login(username, password)
    }

    fn logout(&self, token: &str) -> impl Future<Output = Result<(), KhError>> + Send {
        (**self).logout(token)
    }

    fn fetch_state(&self, token: &str) -> impl Future<Output = Result<StateReply, KhError>> + Send {
        (**self).fetch_state(token)
    }

    fn send_command(
        &self,
        token: &str,
        command: &str,
    ) -> impl Future<Output = Result<CommandReply, KhError>> + Send {
        (**self).send_command(token, command)
    }

    fn fetch_history(
        &self,
        token: &str,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<EventsReply, KhError>> + Send {
        (**self).fetch_history(token, limit)
    }
}
