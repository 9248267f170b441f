use thiserror::Error;

use crate::eth::wire::WireError;
use crate::xapi::TransportError;

/// Errors returned by the ethernet interface manager.
#[derive(Debug, Error)]
pub enum Error {
    /// Reported by the transport, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Interface data could not be converted to or from XML.
    #[error("malformed ethernet interface: {0}")]
    Wire(#[from] WireError),
    /// A delete identifier was neither a name nor an interface record.
    #[error("unknown type sent to delete: {0}")]
    UnknownIdentifier(String),
}
