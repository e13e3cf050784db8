//! Game client — every operation the front-ends can trigger.
//!
//! The client owns the [`Session`], the [`ConsoleLog`] and the [`PanelView`]
//! behind one mutex that is never held across an `.await`. Every visible
//! change is announced through the [`EventPublisher`] port.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use kh_domain::console::{self, ConsoleLog, LineTone, LogLine};
use kh_domain::error::KhError;
use kh_domain::narrative;
use kh_domain::session::{LoginForm, Session, Snapshot};
use kh_domain::status::StatusView;
use kh_domain::view::PanelView;

use crate::ports::{ClientEvent, EventPublisher, GameApi};
use crate::services::poller::{DEFAULT_POLL_INTERVAL, PollHandle};

/// Tunables of a [`GameClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Time between two background refreshes while logged in.
    pub poll_interval: Duration,
    /// Maximum number of lines kept in the console log.
    pub log_capacity: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_capacity: console::DEFAULT_CAPACITY,
        }
    }
}

struct ClientState {
    session: Session,
    console: ConsoleLog,
    view: PanelView,
}

/// Application service driving one player's connection to the game server.
pub struct GameClient<A, P> {
    api: A,
    publisher: P,
    options: ClientOptions,
    state: Mutex<ClientState>,
    poller: Mutex<Option<PollHandle>>,
}

impl<A, P> GameClient<A, P>
where
    A: GameApi,
    P: EventPublisher,
{
    /// Create a logged-out client.
    pub fn new(api: A, publisher: P, options: ClientOptions) -> Self {
        let console = ConsoleLog::with_capacity(options.log_capacity);
        Self {
            api,
            publisher,
            options,
            state: Mutex::new(ClientState {
                session: Session::new(),
                console,
                view: PanelView::default(),
            }),
            poller: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_poller(&self) -> MutexGuard<'_, Option<PollHandle>> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.lock().session.clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.lock().session.is_logged_in()
    }

    /// Render the status fields from the current session.
    #[must_use]
    pub fn status(&self) -> StatusView {
        StatusView::render(&self.lock().session)
    }

    #[must_use]
    pub fn view(&self) -> PanelView {
        self.lock().view
    }

    /// Copy of every line currently in the console log, oldest first.
    #[must_use]
    pub fn log_lines(&self) -> Vec<LogLine> {
        self.lock().console.lines().cloned().collect()
    }

    /// Append a line to the console log.
    pub fn append_line(&self, text: impl Into<String>, tone: LineTone) {
        let line = LogLine::new(text, tone);
        self.lock().console.push(line.clone());
        self.publisher.publish(ClientEvent::Line(line));
    }

    /// Print the start-up banner.
    pub fn greet(&self) {
        for text in console::WELCOME {
            self.append_line(text, LineTone::Muted);
        }
    }

    /// Switch between the log and the map panel.
    pub fn toggle_view(&self) -> PanelView {
        let view = self.lock().view.toggle();
        self.publisher.publish(ClientEvent::View(view));
        view
    }

    fn publish_status(&self) {
        let status = self.status();
        self.publisher.publish(ClientEvent::Status(status));
    }

    fn credentials(&self) -> Result<(String, u64), KhError> {
        let state = self.lock();
        let token = state.session.token().ok_or(KhError::NotLoggedIn)?;
        Ok((token.to_string(), state.session.generation()))
    }

    /// End the session.
    ///
    /// The server is notified on a best-effort basis; whatever it answers,
    /// the local session is cleared and the poller stopped.
    pub async fn logout(&self) {
        self.stop_polling();

        let token = self.lock().session.token().map(str::to_string);
        if let Some(token) = token
            && let Err(err) = self.api.logout(&token).await
        {
            tracing::debug!(error = %err, "logout notification failed");
        }

        let username = {
            let mut state = self.lock();
            let username = state.session.username().map(str::to_string);
            state.session.sign_out();
            username
        };
        tracing::info!(username = username.as_deref().unwrap_or("-"), "logged out");

        self.append_line(console::LOGGED_OUT, LineTone::Muted);
        self.publish_status();
    }

    /// Replace the snapshot with the server's current one.
    ///
    /// A reply that arrives after the session changed (logout, re-login) is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`KhError::NotLoggedIn`] without touching the network when
    /// there is no token, or the transport/server error of the request.
    pub async fn fetch_state(&self) -> Result<(), KhError> {
        let (token, generation) = self.credentials()?;
        let reply = self.api.fetch_state(&token).await?;

        let applied = self
            .lock()
            .session
            .apply_snapshot_if_current(generation, Snapshot::from(reply));
        if applied {
            self.publish_status();
        } else {
            tracing::debug!(generation, "discarding snapshot from a previous session");
        }
        Ok(())
    }

    /// Run `command` on the server, log its narrative, then refresh state.
    ///
    /// # Errors
    ///
    /// Returns the command's error (in which case no refresh is attempted),
    /// or the error of the follow-up refresh.
    pub async fn send_command(&self, command: &str) -> Result<(), KhError> {
        let (token, _) = self.credentials()?;
        let reply = self.api.send_command(&token, command).await?;

        if let Some(event) = reply.event.as_deref() {
            for line in narrative::lines(event) {
                self.append_line(line, LineTone::Plain);
            }
        }

        self.fetch_state().await
    }

    /// Handle a line typed into the command input.
    ///
    /// Blank input is ignored. Otherwise the command is echoed as `> cmd`
    /// and any failure ends up in the log as `Error: …`.
    pub async fn submit_command(&self, input: &str) {
        let command = input.trim();
        if command.is_empty() {
            return;
        }

        self.append_line(format!("> {command}"), LineTone::Plain);
        if let Err(err) = self.send_command(command).await {
            tracing::debug!(error = %err, command, "command failed");
            self.append_line(format!("Error: {err}"), LineTone::Bad);
        }
    }

    /// Replay the `limit` most recent commands and their narratives into the
    /// log, oldest first. Returns the number of commands replayed.
    ///
    /// The server may answer with more entries than asked for; only the
    /// newest `limit` are kept.
    ///
    /// # Errors
    ///
    /// Returns [`KhError::NotLoggedIn`] without a token, or the request's
    /// transport/server error.
    pub async fn fetch_history(&self, limit: Option<u32>) -> Result<usize, KhError> {
        let (token, _) = self.credentials()?;
        let reply = self.api.fetch_history(&token, limit).await?;

        let keep = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
        let entries: Vec<_> = reply.events.iter().take(keep).collect();
        for entry in entries.iter().rev() {
            self.append_line(format!("> {}", entry.cmd), LineTone::Muted);
            for line in narrative::lines(&entry.result) {
                self.append_line(line, LineTone::Plain);
            }
        }
        Ok(entries.len())
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.lock_poller()
            .as_ref()
            .is_some_and(PollHandle::is_running)
    }

    /// Abort the background poller, if any.
    pub fn stop_polling(&self) {
        if self.lock_poller().take().is_some() {
            tracing::debug!("state poller stopped");
        }
    }
}

impl<A, P> GameClient<A, P>
where
    A: GameApi + 'static,
    P: EventPublisher + 'static,
{
    /// Log in with `form`.
    ///
    /// On success the token is stored, `Login OK.` is logged, the poller is
    /// started and the state fetched. A failing follow-up fetch does not undo
    /// the login; it is reported in the log instead.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the credentials are refused; the
    /// session is left exactly as it was.
    pub async fn login(self: &Arc<Self>, form: &LoginForm) -> Result<(), KhError> {
        let reply = self.api.login(&form.username, &form.password).await?;

        self.lock().session.sign_in(form.username.clone(), reply.token);
        tracing::info!(username = %form.username, "logged in");

        self.publish_status();
        self.append_line(console::LOGIN_OK, LineTone::Good);
        self.start_polling();

        if let Err(err) = self.fetch_state().await {
            self.append_line(format!("State refresh failed: {err}"), LineTone::Bad);
        }
        Ok(())
    }

    /// Handle a submitted login form; failures end up in the log as
    /// `Login error: …`.
    pub async fn submit_login(self: &Arc<Self>, form: &LoginForm) {
        if let Err(err) = self.login(form).await {
            tracing::debug!(error = %err, username = %form.username, "login refused");
            self.append_line(format!("Login error: {err}"), LineTone::Bad);
        }
    }

    /// Start the background poller unless one is already running.
    pub fn start_polling(self: &Arc<Self>) {
        let mut poller = self.lock_poller();
        if poller.as_ref().is_some_and(PollHandle::is_running) {
            return;
        }
        *poller = Some(PollHandle::spawn(
            Arc::downgrade(self),
            self.options.poll_interval,
        ));
        tracing::debug!(interval = ?self.options.poll_interval, "state poller started");
    }
}
