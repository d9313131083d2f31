use std::{fmt, io, num::ParseIntError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A road name or object id that the map does not contain.
    NotFound,
    /// A traversal or object definition that does not fit the junction layout.
    MalformedInput,
    Io,
    /// The persisted map is not a literal of the expected shape.
    Parse,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::NotFound, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::MalformedInput, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Parse, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::NotFound => "not found",
            ErrorKind::MalformedInput => "malformed input",
            ErrorKind::Io => "io error",
            ErrorKind::Parse => "parse error",
        };
        write!(f, "{}: {}", kind, self.message)
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            message: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        let kind = if value.is_io() {
            ErrorKind::Io
        } else {
            ErrorKind::Parse
        };
        Error {
            kind,
            message: value.to_string(),
        }
    }
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        Error {
            kind: ErrorKind::Parse,
            message: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_kind() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.to_string().starts_with("io error"));
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let err: Error = serde_json::from_str::<Vec<u32>>("[1, ").unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::Parse);
    }
}
