use super::Error;

#[derive(Debug)]
pub(super) struct NotConnected;

impl std::error::Error for NotConnected {}

impl core::fmt::Display for NotConnected {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("store is not connected; call `Store::connect` first")
    }
}

impl Error {
    /// Creates an error for an operation issued against a disconnected store.
    pub fn not_connected() -> Error {
        Error::from(super::ErrorKind::NotConnected(NotConnected))
    }

    /// Returns `true` if this error is a not-connected error.
    pub fn is_not_connected(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::NotConnected(_)))
    }
}
