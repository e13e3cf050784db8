//! Everything the client knows about the logged-in user and the game.
//!
//! All mutation goes through the accessor methods below. A [`generation`]
//! counter is bumped on every sign-in and sign-out so that a fetch which
//! straddles a session change can be recognised and discarded.
//!
//! [`generation`]: Session::generation

use crate::api::wire::StateReply;
use crate::game_state::GameState;
use crate::player::{PeerRecord, SelfRecord};

/// What a successful state fetch reports; replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub state: Option<GameState>,
    pub self_record: Option<SelfRecord>,
    pub peer: Option<PeerRecord>,
}

impl From<StateReply> for Snapshot {
    fn from(reply: StateReply) -> Self {
        Self {
            state: reply.state,
            self_record: reply.self_record,
            peer: reply.peer,
        }
    }
}

/// Credentials collected by a login form.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Client-held session and last-known game snapshot.
#[derive(Debug, Clone, Default)]
pub struct Session {
    username: Option<String>,
    token: Option<String>,
    snapshot: Snapshot,
    generation: u64,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.snapshot.state.as_ref()
    }

    #[must_use]
    pub fn self_record(&self) -> Option<&SelfRecord> {
        self.snapshot.self_record.as_ref()
    }

    #[must_use]
    pub fn peer(&self) -> Option<&PeerRecord> {
        self.snapshot.peer.as_ref()
    }

    /// Counter identifying the current sign-in; changes on every sign-in/sign-out.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record a successful login. Any snapshot from an earlier session is
    /// dropped so the status never mixes two users.
    pub fn sign_in(&mut self, username: impl Into<String>, token: impl Into<String>) {
        self.username = Some(username.into());
        self.token = Some(token.into());
        self.snapshot = Snapshot::default();
        self.generation += 1;
    }

    /// Forget the user, the token, both player records and the snapshot.
    pub fn sign_out(&mut self) {
        self.username = None;
        self.token = None;
        self.snapshot = Snapshot::default();
        self.generation += 1;
    }

    /// Replace the snapshot wholesale.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
    }

    /// Replace the snapshot only if it was requested under the current
    /// generation. Returns whether it was applied.
    pub fn apply_snapshot_if_current(&mut self, generation: u64, snapshot: Snapshot) -> bool {
        if generation != self.generation || !self.is_logged_in() {
            return false;
        }
        self.apply_snapshot(snapshot);
        true
    }
}
