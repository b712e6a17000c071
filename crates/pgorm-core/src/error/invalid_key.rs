use super::Error;

/// A primary key value does not fit the table's key column.
#[derive(Debug)]
pub(super) struct InvalidKey {
    message: Box<str>,
}

impl std::error::Error for InvalidKey {}

impl core::fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid primary key: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid key error.
    ///
    /// Returned when a key passed to `load`, or read out of a document during
    /// `save`, is missing or cannot be converted to the key column type.
    pub fn invalid_key(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidKey(InvalidKey {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidKey(_)))
    }
}
