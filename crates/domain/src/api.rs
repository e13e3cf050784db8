//! Game server HTTP API — endpoints, wire payloads, and the `{ok, error}` envelope.
//!
//! Everything here is pure: adapters perform the actual request and hand the
//! status code and raw body to [`envelope::decode`].

pub mod endpoint;
pub mod envelope;
pub mod wire;

pub use endpoint::{ApiBase, Endpoint, Method, bearer};
pub use envelope::decode;
