use super::Error;

/// A value could not be serialized into a JSON document.
#[derive(Debug)]
pub(super) struct EncodeError {
    type_name: &'static str,
    source: serde_json::Error,
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to encode `{}` as a JSON document: {}",
            self.type_name, self.source
        )
    }
}

impl Error {
    /// Creates an encode error for a value of type `type_name`.
    pub fn encode(type_name: &'static str, source: serde_json::Error) -> Error {
        Error::from(super::ErrorKind::Encode(EncodeError { type_name, source }))
    }

    /// Returns `true` if this error is an encode error.
    pub fn is_encode(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::Encode(_)))
    }
}
