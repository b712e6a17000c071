mod adhoc;
mod database;
mod decode;
mod encode;
mod invalid_configuration;
mod invalid_connection_url;
mod invalid_key;
mod invalid_model;
mod not_connected;
mod record_not_found;
mod task_failed;

use adhoc::AdhocError;
use database::DatabaseError;
use decode::DecodeError;
use encode::EncodeError;
use invalid_configuration::InvalidConfiguration;
use invalid_connection_url::InvalidConnectionUrl;
use invalid_key::InvalidKey;
use invalid_model::InvalidModel;
use not_connected::NotConnected;
use record_not_found::RecordNotFoundError;
use std::sync::Arc;
use task_failed::TaskFailed;

/// Returns early with an ad hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in pgorm.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let Some(inner) = consequent.inner else {
            return Error {
                inner: Some(Arc::new(ErrorInner {
                    kind: ErrorKind::Unknown,
                    cause: Some(self),
                })),
            };
        };

        let (kind, rest) = match Arc::try_unwrap(inner) {
            Ok(inner) => (inner.kind, inner.cause),
            Err(shared) => {
                let rest = shared.cause.clone();
                (ErrorKind::Shared(shared), rest)
            }
        };

        // `self` becomes the root of the consequent's own chain.
        let cause = match rest {
            Some(rest) => self.context_impl(rest),
            None => self,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(cause),
            })),
        }
    }

    /// Iterates from this error down to its root cause.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        let mut kind = self
            .inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown);
        while let ErrorKind::Shared(inner) = kind {
            kind = &inner.kind;
        }
        kind
    }

    /// Returns `true` if this error, or any error in its cause chain, satisfies `f`.
    fn any(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| f(err.kind()))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Database(err) => Some(err.source_ref()),
            ErrorKind::Encode(err) => Some(err),
            ErrorKind::Decode(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Database(DatabaseError),
    Decode(DecodeError),
    Encode(EncodeError),
    InvalidConfiguration(InvalidConfiguration),
    InvalidConnectionUrl(InvalidConnectionUrl),
    InvalidKey(InvalidKey),
    InvalidModel(InvalidModel),
    NotConnected(NotConnected),
    RecordNotFound(RecordNotFoundError),
    /// A link borrowed from a consequent that other clones still hold.
    Shared(Arc<ErrorInner>),
    TaskFailed(TaskFailed),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Database(err) => core::fmt::Display::fmt(err, f),
            Decode(err) => core::fmt::Display::fmt(err, f),
            Encode(err) => core::fmt::Display::fmt(err, f),
            InvalidConfiguration(err) => core::fmt::Display::fmt(err, f),
            InvalidConnectionUrl(err) => core::fmt::Display::fmt(err, f),
            InvalidKey(err) => core::fmt::Display::fmt(err, f),
            InvalidModel(err) => core::fmt::Display::fmt(err, f),
            NotConnected(err) => core::fmt::Display::fmt(err, f),
            RecordNotFound(err) => core::fmt::Display::fmt(err, f),
            Shared(inner) => core::fmt::Display::fmt(&inner.kind, f),
            TaskFailed(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown pgorm error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::invalid_connection_url(err.to_string())
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for &str {
    fn into_error(self) -> Error {
        Error::from_args(format_args!("{self}"))
    }
}

impl IntoError for String {
    fn into_error(self) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(self)))
    }
}
