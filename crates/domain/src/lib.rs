//! # kh-domain
//!
//! Pure domain model for the Kepler's Horizon game client.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, factions, timestamps
//! - Define the **game state snapshot** and the **player records** the server reports
//! - Define the **session** (who is logged in, last-known snapshot) and its accessors
//! - Define the **wire envelope** (`{ok, error, ...}`) and its decoding rules
//! - Build endpoint URLs against a configurable base
//! - Project the session onto the named **status fields** (rendering)
//! - Hold the **console log** and the **panel view** toggle
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod faction;
pub mod time;

pub mod api;
pub mod console;
pub mod game_state;
pub mod narrative;
pub mod player;
pub mod session;
pub mod status;
pub mod view;
