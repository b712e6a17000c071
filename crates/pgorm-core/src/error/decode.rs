use super::Error;

/// A stored document could not be decoded into the mapped type.
///
/// Distinct from "not found": the row exists but its `data` column does not
/// match the shape of the type reading it.
#[derive(Debug)]
pub(super) struct DecodeError {
    table: Box<str>,
    key: Box<str>,
    source: serde_json::Error,
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to decode document; table={} key={}: {}",
            self.table, self.key, self.source
        )
    }
}

impl Error {
    /// Creates a decode error for the row identified by `table` and `key`.
    pub fn decode(
        table: impl Into<String>,
        key: impl core::fmt::Display,
        source: serde_json::Error,
    ) -> Error {
        Error::from(super::ErrorKind::Decode(DecodeError {
            table: table.into().into(),
            key: key.to_string().into(),
            source,
        }))
    }

    /// Returns `true` if this error is a decode error.
    pub fn is_decode(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::Decode(_)))
    }
}
