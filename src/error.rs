use std::fmt;

#[derive(Debug)]
pub enum AutomationError {
    /// An interaction was attempted with no live session on the calling thread.
    NotInitialized,
    /// A bounded wait ran out before its condition became true.
    Timeout { what: String },
    /// The user carousel was exhausted without matching the requested name.
    UserNotFound {
        name: String,
        attempts: usize,
        total: usize,
    },
    /// A job role was not present in the listed roles.
    RoleNotFound { name: String, available: Vec<String> },
    Session(String),
    Client(fantoccini::error::CmdError),
    Io(std::io::Error),
    Generic(anyhow::Error),
}

impl fmt::Display for AutomationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "no browser session started on this thread"),
            Self::Timeout { what } => write!(f, "timed out waiting for {what}"),
            Self::UserNotFound {
                name,
                attempts,
                total,
            } => write!(
                f,
                "user '{name}' not found after checking {attempts} out of {total} users"
            ),
            Self::RoleNotFound { name, available } => write!(
                f,
                "job role '{name}' not found in the available job roles: {available:?}"
            ),
            Self::Session(msg) => write!(f, "session error: {msg}"),
            Self::Client(e) => write!(f, "webdriver client error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Generic(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AutomationError {}

impl From<fantoccini::error::CmdError> for AutomationError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        Self::Client(err)
    }
}

impl From<fantoccini::error::NewSessionError> for AutomationError {
    fn from(err: fantoccini::error::NewSessionError) -> Self {
        Self::Session(format!("webdriver session creation error: {err}"))
    }
}

impl From<std::io::Error> for AutomationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for AutomationError {
    fn from(err: anyhow::Error) -> Self {
        Self::Generic(err)
    }
}

pub type Result<T> = std::result::Result<T, AutomationError>;
