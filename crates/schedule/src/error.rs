use strum::{AsRefStr, Display};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("no credential available for the schedule service")]
    MissingCredential,

    #[error("schedule service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("unexpected response from schedule service: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for SyncError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::MalformedResponse(value.to_string())
        } else {
            Self::RemoteUnavailable(value.to_string())
        }
    }
}

/// Public controller operation a report refers to.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Load,
    UpdateDay,
    SaveAll,
    ResetToDefault,
}
