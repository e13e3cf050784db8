//! # kh-adapter-http-reqwest
//!
//! HTTP adapter — implements the [`GameApi`](kh_app::ports::GameApi) port
//! against the game server's JSON endpoints using `reqwest`.
//!
//! ## Responsibilities
//! - Build endpoint URLs from a configurable [`ApiBase`](kh_domain::api::ApiBase)
//! - Attach the JSON content type and, where required, the bearer token
//! - Hand status and body to the shared envelope decoder
//!
//! ## Dependency rule
//! Depends on `kh-app` (for the port trait) and `kh-domain` (for wire types).

mod client;

pub use client::{DEFAULT_TIMEOUT, ReqwestGameApi};
