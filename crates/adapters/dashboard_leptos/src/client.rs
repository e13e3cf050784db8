//! Reactive client state shared by every component through context.
//!
//! Mirrors the native game client: the [`Session`] and [`ConsoleLog`] live in
//! signals, and the poll timer is owned here so logout can drop it.

use gloo_timers::callback::Interval;
use kh_domain::console::{self, ConsoleLog, LineTone, LogLine};
use kh_domain::error::KhError;
use kh_domain::narrative;
use kh_domain::session::{LoginForm, Session, Snapshot};
use kh_domain::status::StatusView;
use kh_domain::view::PanelView;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;

/// Milliseconds between two background refreshes.
pub const POLL_INTERVAL_MS: u32 = 3000;

/// Handle to the page's client state. Cheap to copy.
#[derive(Clone, Copy)]
pub struct GameClient {
    session: RwSignal<Session>,
    log: RwSignal<ConsoleLog>,
    view: RwSignal<PanelView>,
    poller: StoredValue<Option<Interval>, LocalStorage>,
}

impl GameClient {
    fn new() -> Self {
        Self {
            session: RwSignal::new(Session::new()),
            log: RwSignal::new(ConsoleLog::with_capacity(console::DEFAULT_CAPACITY)),
            view: RwSignal::new(PanelView::default()),
            poller: StoredValue::new_local(None),
        }
    }

    /// Status fields, recomputed whenever the session changes.
    pub fn status(self) -> Memo<StatusView> {
        let session = self.session;
        Memo::new(move |_| session.with(StatusView::render))
    }

    pub fn lines(self) -> Vec<LogLine> {
        self.log.with(|log| log.lines().cloned().collect())
    }

    pub fn view(self) -> PanelView {
        self.view.get()
    }

    pub fn append_line(self, text: impl Into<String>, tone: LineTone) {
        let line = LogLine::new(text, tone);
        self.log.update(|log| log.push(line));
    }

    pub fn toggle_view(self) {
        self.view.update(|view| {
            view.toggle();
        });
    }

    fn credentials(self) -> Result<(String, u64), KhError> {
        self.session.with_untracked(|session| {
            let token = session.token().ok_or(KhError::NotLoggedIn)?;
            Ok((token.to_string(), session.generation()))
        })
    }

    pub async fn fetch_state(self) -> Result<(), KhError> {
        let (token, generation) = self.credentials()?;
        let reply = api::fetch_state(&token).await?;
        self.session.update(|session| {
            if !session.apply_snapshot_if_current(generation, Snapshot::from(reply)) {
                leptos::logging::debug_warn!("discarding snapshot from a previous session");
            }
        });
        Ok(())
    }

    pub async fn login(self, form: LoginForm) {
        let reply = match api::login(&form.username, &form.password).await {
            Ok(reply) => reply,
            Err(err) => {
                self.append_line(format!("Login error: {err}"), LineTone::Bad);
                return;
            }
        };

        self.session
            .update(|session| session.sign_in(form.username.clone(), reply.token));
        self.append_line(console::LOGIN_OK, LineTone::Good);
        self.start_polling();

        if let Err(err) = self.fetch_state().await {
            self.append_line(format!("State refresh failed: {err}"), LineTone::Bad);
        }
    }

    pub async fn logout(self) {
        self.stop_polling();

        let token = self
            .session
            .with_untracked(|session| session.token().map(str::to_string));
        if let Some(token) = token
            && let Err(err) = api::logout(&token).await
        {
            leptos::logging::debug_warn!("logout notification failed: {err}");
        }

        self.session.update(Session::sign_out);
        self.append_line(console::LOGGED_OUT, LineTone::Muted);
    }

    async fn send_command(self, command: &str) -> Result<(), KhError> {
        let (token, _) = self.credentials()?;
        let reply = api::send_command(&token, command).await?;
        if let Some(event) = reply.event.as_deref() {
            for line in narrative::lines(event) {
                self.append_line(line, LineTone::Plain);
            }
        }
        self.fetch_state().await
    }

    pub async fn submit_command(self, input: String) {
        let command = input.trim();
        if command.is_empty() {
            return;
        }
        self.append_line(format!("> {command}"), LineTone::Plain);
        if let Err(err) = self.send_command(command).await {
            self.append_line(format!("Error: {err}"), LineTone::Bad);
        }
    }

    fn start_polling(self) {
        if self.poller.with_value(Option::is_some) {
            return;
        }
        let interval = Interval::new(POLL_INTERVAL_MS, move || {
            if !self.session.with_untracked(Session::is_logged_in) {
                return;
            }
            spawn_local(async move {
                // Poll failures stay out of the visible log.
                if let Err(err) = self.fetch_state().await {
                    leptos::logging::debug_warn!("background refresh failed: {err}");
                }
            });
        });
        self.poller.set_value(Some(interval));
    }

    fn stop_polling(self) {
        // Dropping the Interval cancels the browser timer.
        self.poller.set_value(None);
    }
}

/// Create the client state and provide it to the component tree.
pub fn provide_game_client() -> GameClient {
    let client = GameClient::new();
    provide_context(client);
    client
}

/// Access the client state from Leptos context.
///
/// Must be called below the component that called [`provide_game_client`].
pub fn use_game_client() -> GameClient {
    use_context::<GameClient>().expect("GameClient not found in context")
}
