use super::Error;

/// The store URL is not a usable PostgreSQL connection string.
#[derive(Debug)]
pub(super) struct InvalidConnectionUrl {
    reason: Box<str>,
}

impl std::error::Error for InvalidConnectionUrl {}

impl core::fmt::Display for InvalidConnectionUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid PostgreSQL URL: {}", self.reason)
    }
}

impl Error {
    /// Returned for unparsable URLs, unsupported schemes and URLs missing a
    /// host or database name.
    pub fn invalid_connection_url(reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConnectionUrl(InvalidConnectionUrl {
            reason: reason.into().into(),
        }))
    }

    pub fn is_invalid_connection_url(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidConnectionUrl(_)))
    }
}
