//! Common error type crossing the client's port boundary.

/// Everything that can go wrong while talking to the game server.
///
/// The `Display` text of each variant is what the interface layer prints
/// in the console log, so it must read well on its own.
#[derive(Debug, thiserror::Error)]
pub enum KhError {
    /// The server answered with `ok: false` (or no `ok`) and an `error` message.
    #[error("{message}")]
    Server { message: String },

    /// The server answered without a usable `error` message.
    #[error("server error ({status})")]
    Status { status: u16 },

    /// The request never produced a response (connection refused, DNS, …).
    #[error("{0}")]
    Transport(String),

    /// The body said `ok: true` but the payload did not have the expected shape.
    #[error("unexpected response payload")]
    Decode(#[source] serde_json::Error),

    /// An authenticated call was attempted without a session token.
    #[error("not logged in")]
    NotLoggedIn,
}
