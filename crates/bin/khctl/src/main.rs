//! # khctl — Kepler's Horizon terminal client
//!
//! Composition root that wires the HTTP adapter into the game client and runs
//! an interactive prompt.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise tracing (stderr, so it never mixes with the game log)
//! - Construct the `reqwest` game API adapter and the event bus
//! - Construct the game client, injecting both via port traits
//! - Read stdin line by line and dispatch directives and commands
//! - Log out on `:quit`, end of input or Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no game logic belongs here.

mod config;
mod console;

use std::sync::Arc;

use anyhow::Context;
use kh_adapter_http_reqwest::ReqwestGameApi;
use kh_app::event_bus::InProcessEventBus;
use kh_app::ports::{EventPublisher, GameApi};
use kh_app::services::game_client::{ClientOptions, GameClient};
use kh_domain::api::ApiBase;
use kh_domain::console::LineTone;
use kh_domain::session::LoginForm;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;
use crate::console::input::{self, HELP, Input};
use crate::console::printer::{self, Printer};
use crate::console::stdin::{self, LineReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading khctl.toml")?;
    init_tracing(&config.logging.filter);

    // Adapter
    let api = ReqwestGameApi::with_timeout(ApiBase::new(&config.api.base_url), config.timeout())
        .context("building game API client")?;
    tracing::info!(base = %config.api.base_url, "game server configured");

    // Event bus and terminal output
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let output = tokio::spawn(printer::run(
        event_bus.subscribe(),
        Printer::new(config.display.color),
    ));

    // Client
    let client = Arc::new(GameClient::new(
        api,
        Arc::clone(&event_bus),
        ClientOptions {
            poll_interval: config.poll_interval(),
            log_capacity: config.display.log_capacity,
        },
    ));
    client.greet();

    let outcome = prompt(&client, &config).await;

    if client.is_logged_in() {
        client.logout().await;
    }
    drop(client);
    drop(event_bus);
    output.await.context("terminal output task")?;

    outcome
}

fn init_tracing(filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn prompt<A, P>(client: &Arc<GameClient<A, P>>, config: &Config) -> anyhow::Result<()>
where
    A: GameApi + 'static,
    P: EventPublisher + 'static,
{
    let mut lines = LineReader::spawn(std::io::BufReader::new(std::io::stdin()))
        .context("starting stdin reader")?;
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.transpose().context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                None
            }
        };
        let Some(line) = line else {
            return Ok(());
        };

        let flow = match input::parse(&line) {
            Ok(Input::Quit) => Flow::Quit,
            Ok(input) => dispatch(client, config, input).await,
            Err(err) => {
                client.append_line(err.to_string(), LineTone::Bad);
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

async fn dispatch<A, P>(client: &Arc<GameClient<A, P>>, config: &Config, input: Input) -> Flow
where
    A: GameApi + 'static,
    P: EventPublisher + 'static,
{
    match input {
        Input::Empty | Input::Quit => {}
        Input::Login { username } => {
            let Some(username) = username.or_else(|| config.session.username.clone()) else {
                client.append_line("Login error: username required (:login <user>)", LineTone::Bad);
                return Flow::Continue;
            };
            let password = tokio::select! {
                password = read_password(&username) => password,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupted during password prompt");
                    return Flow::Quit;
                }
            };
            match password {
                Ok(password) => client.submit_login(&LoginForm::new(username, password)).await,
                Err(err) => client.append_line(format!("Login error: {err:#}"), LineTone::Bad),
            }
        }
        Input::Logout => client.logout().await,
        Input::ToggleMap => {
            client.toggle_view();
        }
        Input::Status => printer::write_lines(&printer::status_table(&client.status())),
        Input::History { limit } => match client.fetch_history(limit).await {
            Ok(0) => client.append_line("No commands yet.", LineTone::Muted),
            Ok(_) => {}
            Err(err) => client.append_line(format!("Error: {err}"), LineTone::Bad),
        },
        Input::Help => {
            let help: Vec<String> = HELP.lines().map(str::to_string).collect();
            printer::write_lines(&help);
        }
        Input::Command(command) => client.submit_command(&command).await,
    }
    Flow::Continue
}

/// Prompt for the password without echo on the controlling terminal.
async fn read_password(username: &str) -> anyhow::Result<String> {
    let prompt = format!("Password for {username}: ");
    let password = stdin::spawn_password_prompt(prompt)
        .context("starting password prompt")?
        .await
        .context("password prompt ended")?
        .context("reading password")?;
    Ok(password)
}
