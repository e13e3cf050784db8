//! Parsing of the lines typed at the prompt.
//!
//! Lines starting with `:` are client directives; everything else is sent to
//! the server verbatim as a game command.

/// Text printed by `:help`.
pub const HELP: &str = "\
Directives:
  :login [user]   log in (password is prompted without echo)
  :logout         end the session
  :map            toggle between the log and the map view
  :status         print every status field
  :history [n]    replay the last n commands (server default when omitted)
  :help           show this text
  :quit           log out and exit
Anything else is sent to the server as a game command.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank line.
    Empty,
    Login { username: Option<String> },
    Logout,
    ToggleMap,
    Status,
    History { limit: Option<u32> },
    Help,
    Quit,
    /// Free-text game command, already trimmed.
    Command(String),
}

/// Errors produced while parsing a directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown directive :{0} (try :help)")]
    UnknownDirective(String),
    #[error(":{directive} takes no argument")]
    UnexpectedArgument { directive: &'static str },
    #[error("too many arguments to :{0}")]
    TooManyArguments(String),
    #[error("invalid history limit {0:?}")]
    InvalidLimit(String),
}

/// Parse one input line.
///
/// # Errors
///
/// Returns an [`InputError`] for unknown directives or malformed arguments.
pub fn parse(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    let Some(directive) = line.strip_prefix(':') else {
        return Ok(if line.is_empty() {
            Input::Empty
        } else {
            Input::Command(line.to_string())
        });
    };

    let mut words = directive.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();
    if words.next().is_some() {
        return Err(InputError::TooManyArguments(name.to_string()));
    }

    let no_arg = |directive: &'static str, input: Input| match arg {
        Some(_) => Err(InputError::UnexpectedArgument { directive }),
        None => Ok(input),
    };

    match name {
        "login" => Ok(Input::Login {
            username: arg.map(str::to_string),
        }),
        "history" => match arg {
            None => Ok(Input::History { limit: None }),
            Some(raw) => raw
                .parse()
                .map(|limit| Input::History { limit: Some(limit) })
                .map_err(|_| InputError::InvalidLimit(raw.to_string())),
        },
        "logout" => no_arg("logout", Input::Logout),
        "map" => no_arg("map", Input::ToggleMap),
        "status" => no_arg("status", Input::Status),
        "help" => no_arg("help", Input::Help),
        "quit" | "exit" => no_arg("quit", Input::Quit),
        other => Err(InputError::UnknownDirective(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_plain_text_as_command() {
        assert_eq!(
            parse("  start learning \n").unwrap(),
            Input::Command("start learning".to_string())
        );
    }

    #[test]
    fn should_treat_blank_line_as_empty() {
        assert_eq!(parse("   ").unwrap(), Input::Empty);
    }

    #[test]
    fn should_parse_login_with_and_without_user() {
        assert_eq!(
            parse(":login alice").unwrap(),
            Input::Login {
                username: Some("alice".to_string())
            }
        );
        assert_eq!(parse(":login").unwrap(), Input::Login { username: None });
    }

    #[test]
    fn should_parse_history_limit() {
        assert_eq!(
            parse(":history 20").unwrap(),
            Input::History { limit: Some(20) }
        );
        assert_eq!(parse(":history").unwrap(), Input::History { limit: None });
    }

    #[test]
    fn should_reject_invalid_history_limit() {
        assert_eq!(
            parse(":history lots").unwrap_err(),
            InputError::InvalidLimit("lots".to_string())
        );
    }

    #[test]
    fn should_parse_simple_directives() {
        assert_eq!(parse(":logout").unwrap(), Input::Logout);
        assert_eq!(parse(":map").unwrap(), Input::ToggleMap);
        assert_eq!(parse(":status").unwrap(), Input::Status);
        assert_eq!(parse(":help").unwrap(), Input::Help);
        assert_eq!(parse(":quit").unwrap(), Input::Quit);
        assert_eq!(parse(":exit").unwrap(), Input::Quit);
    }

    #[test]
    fn should_reject_argument_to_simple_directive() {
        assert_eq!(
            parse(":map now").unwrap_err(),
            InputError::UnexpectedArgument { directive: "map" }
        );
    }

    #[test]
    fn should_reject_extra_arguments() {
        assert_eq!(
            parse(":login alice bob").unwrap_err(),
            InputError::TooManyArguments("login".to_string())
        );
    }

    #[test]
    fn should_reject_unknown_directive() {
        let err = parse(":fly").unwrap_err();
        assert_eq!(err.to_string(), "unknown directive :fly (try :help)");
    }
}
