use thiserror::Error;

/// Terminal outcome of a failed operation, surfaced to the user verbatim.
///
/// Every awaited wallet or network interaction that can fail degrades into
/// one of these; nothing propagates past the gateway. Retrying is always a
/// fresh user action, never automatic.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Failure {
    #[error("No wallet detected. Please install or configure a wallet before connecting")]
    ProviderMissing,

    #[error("Failed to connect wallet")]
    ConnectionRejected,

    #[error("Failed to switch to the correct network")]
    NetworkSwitchFailed,

    #[error("Call reverted: {0}")]
    CallReverted(String),

    #[error("Call failed: {0}")]
    CallNetworkError(String),

    /// The transaction confirmed but its receipt carried no pool-creation
    /// event, so there is no address to report. Either the bound contract is
    /// not the factory we expect or the event signature drifted.
    #[error("Transaction {0} confirmed without a pool creation event")]
    AmbiguousOutcome(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}
