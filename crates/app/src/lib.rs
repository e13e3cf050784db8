//! # kh-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `GameApi` — login, logout, fetch state, send command, fetch history
//!   - `EventPublisher` — notify front-ends of new log lines, status, view
//! - Define the **driving/inbound** use-case struct:
//!   - `GameClient` — owns the session, the console log and the panel view,
//!     and performs every client operation
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (event bus, state poller)
//!
//! ## Dependency rule
//! Depends on `kh-domain` only (plus `tokio` for channels, timers and the
//! poller task). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
