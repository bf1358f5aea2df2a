use alloy::transports::{RpcError, TransportError};

pub trait RpcErrorExt {
    /// Returns whether the node received the request and answered it with an
    /// error payload (e.g. "insufficient funds", "nonce too low"), as opposed
    /// to the request never reaching the node or the response being
    /// unreadable.
    fn is_rejection(&self) -> bool;
}

impl RpcErrorExt for TransportError {
    fn is_rejection(&self) -> bool {
        match self {
            RpcError::ErrorResp(err) => {
                tracing::debug!(?err, "node rejected request");
                true
            }
            _ => false,
        }
    }
}

/// Create an arbitrary error that the node answered with.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_rejection_error() -> TransportError {
    TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload::internal_error())
}

/// Create an arbitrary error for a request that never got an answer.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_transport_error() -> TransportError {
    alloy::transports::TransportErrorKind::backend_gone()
}
