use backtrace::Backtrace;
use serde::{de, ser};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for JSON list column operations.
///
/// Each kind names one category of failure so callers can decide how to react
/// without inspecting messages.
///
/// # Examples
///
/// ```rust,ignore
/// use jsonlist::errors::{ErrorKind, JsonListError, JsonListResult};
///
/// fn example() -> JsonListResult<()> {
///     Err(JsonListError::new("List column is empty", ErrorKind::DecodeError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Column level faults
    /// Text read from a storage row is not a JSON array
    DecodeError,
    /// A list could not be turned into a bindable column value
    EncodeError,
    /// The text projection failed; indicates an upstream programming or data fault
    FormattingError,
    /// A token stream or byte stream could not be read or written
    IOError,

    // Underlying causes
    /// The input does not follow the JSON grammar
    SyntaxError,
    /// An element has no JSON representation
    UnrepresentableValue,

    // Configuration
    /// A configuration value is not recognised
    InvalidDataType,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl ErrorKind {
    /// Returns `true` for kinds that are not meant to be recovered from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorKind::FormattingError)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::DecodeError => write!(f, "Decode error"),
            ErrorKind::EncodeError => write!(f, "Encode error"),
            ErrorKind::FormattingError => write!(f, "Formatting error"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::SyntaxError => write!(f, "Syntax error"),
            ErrorKind::UnrepresentableValue => write!(f, "Unrepresentable value"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type for JSON list column operations.
///
/// `JsonListError` carries a message, a kind, the raw text that could not be
/// handled (when there was one) and an optional cause, forming a chain that
/// ends at the original fault.
///
/// # Examples
///
/// ```rust,ignore
/// use jsonlist::errors::{ErrorKind, JsonListError};
///
/// let cause = JsonListError::new("EOF while parsing a list", ErrorKind::SyntaxError);
/// let err = JsonListError::new_with_cause("Failed to parse JSON [[1,] as List", ErrorKind::DecodeError, cause)
///     .with_raw_text("[1,");
/// ```
#[derive(Clone)]
pub struct JsonListError {
    message: String,
    error_kind: ErrorKind,
    raw_text: Option<String>,
    cause: Option<Box<JsonListError>>,
    backtrace: Atomic<Backtrace>,
}

impl JsonListError {
    /// Creates a new `JsonListError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        JsonListError {
            message: message.to_string(),
            error_kind,
            raw_text: None,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `JsonListError` wrapping a cause error.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: JsonListError) -> Self {
        JsonListError {
            message: message.to_string(),
            error_kind,
            raw_text: None,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Attaches the raw text that triggered this error.
    pub fn with_raw_text(mut self, raw_text: &str) -> Self {
        self.raw_text = Some(raw_text.to_string());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    pub fn cause(&self) -> Option<&JsonListError> {
        self.cause.as_deref()
    }

    /// Returns `true` when the kind of this error is fatal.
    pub fn is_fatal(&self) -> bool {
        self.error_kind.is_fatal()
    }
}

impl Display for JsonListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for JsonListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for JsonListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for JSON list operations.
pub type JsonListResult<T> = Result<T, JsonListError>;

impl de::Error for JsonListError {
    fn custom<T: Display>(msg: T) -> Self {
        JsonListError::new(&msg.to_string(), ErrorKind::SyntaxError)
    }
}

impl ser::Error for JsonListError {
    fn custom<T: Display>(msg: T) -> Self {
        JsonListError::new(&msg.to_string(), ErrorKind::UnrepresentableValue)
    }
}

impl From<serde_json::Error> for JsonListError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let error_kind = match err.classify() {
            Category::Io => ErrorKind::IOError,
            Category::Syntax | Category::Eof => ErrorKind::SyntaxError,
            Category::Data => ErrorKind::UnrepresentableValue,
        };
        JsonListError::new(&err.to_string(), error_kind)
    }
}

impl From<std::io::Error> for JsonListError {
    fn from(err: std::io::Error) -> Self {
        JsonListError::new(&format!("IO error: {}", err), ErrorKind::IOError)
    }
}

impl From<std::string::FromUtf8Error> for JsonListError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        JsonListError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::IOError,
        )
    }
}

impl From<String> for JsonListError {
    fn from(msg: String) -> Self {
        JsonListError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for JsonListError {
    fn from(msg: &str) -> Self {
        JsonListError::new(msg, ErrorKind::InternalError)
    }
}
