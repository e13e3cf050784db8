//! Endpoint catalogue and URL construction.

/// HTTP method used by an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// The server endpoints consumed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST login {username,password} -> {ok,token}`
    Login,
    /// `POST logout {} -> {ok}`
    Logout,
    /// `GET state -> {ok,state,self,peer}`
    State,
    /// `POST command {command} -> {ok,event}`
    Command,
    /// `GET events -> {ok,events}`
    Events,
}

impl Endpoint {
    /// Path relative to the API base, without a leading slash.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::State => "state",
            Self::Command => "command",
            Self::Events => "events",
        }
    }

    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::State | Self::Events => Method::Get,
            Self::Login | Self::Logout | Self::Command => Method::Post,
        }
    }

    /// Whether the request must carry the session's bearer token.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Base prefix every endpoint path is appended to.
///
/// The default is the root (empty prefix), so `login` resolves to `/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Wrap a base such as `http://127.0.0.1:8080/api` or `/kh/api`.
    ///
    /// Trailing slashes are dropped so joining never doubles them.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self(base.trim_end_matches('/').to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join `path` onto the base with exactly one `/` in between.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.0)
    }

    /// Full URL of `endpoint`.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        self.url(endpoint.path())
    }
}

/// Value of the `Authorization` header for `token`.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_root() {
        let base = ApiBase::default();
        assert_eq!(base.endpoint_url(Endpoint::Login), "/login");
    }

    #[test]
    fn should_join_with_single_slash() {
        let base = ApiBase::new("http://localhost:8080/api/");
        assert_eq!(base.url("/state"), "http://localhost:8080/api/state");
        assert_eq!(base.url("state"), "http://localhost:8080/api/state");
    }

    #[test]
    fn should_use_relative_prefix() {
        let base = ApiBase::new("/kh/api");
        assert_eq!(base.endpoint_url(Endpoint::Command), "/kh/api/command");
    }

    #[test]
    fn should_map_methods() {
        assert_eq!(Endpoint::Login.method(), Method::Post);
        assert_eq!(Endpoint::Logout.method(), Method::Post);
        assert_eq!(Endpoint::Command.method(), Method::Post);
        assert_eq!(Endpoint::State.method(), Method::Get);
        assert_eq!(Endpoint::Events.method(), Method::Get);
    }

    #[test]
    fn should_require_auth_everywhere_but_login() {
        assert!(!Endpoint::Login.requires_auth());
        assert!(Endpoint::Logout.requires_auth());
        assert!(Endpoint::State.requires_auth());
        assert!(Endpoint::Command.requires_auth());
        assert!(Endpoint::Events.requires_auth());
    }

    #[test]
    fn should_format_bearer_header() {
        assert_eq!(bearer("abc123"), "Bearer abc123");
    }
}
