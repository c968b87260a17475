use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no scheduled cleaning with id {0}")]
    ScheduleNotFound(String),
    #[error("no cleaning item with id {0}")]
    ItemNotFound(String),
    #[error("invalid time of day '{0}', expected HH:mm")]
    InvalidTime(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("unknown frequency '{0}'")]
    UnknownFrequency(String),
    #[error("unsupported state file version {0}")]
    UnsupportedVersion(u32),
    #[error("could not determine a directory for application state")]
    NoStateDir,
    #[error("state file I/O failed")]
    Io(#[from] std::io::Error),
    #[error("state file is not valid JSON")]
    Json(#[from] serde_json::Error),
}
