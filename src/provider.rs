use crate::calls::{
    CallOutput,
    FactoryCall,
    WriteReceipt,
};
use async_trait::async_trait;
use ethers::types::Address;
use thiserror::Error;

/// How the wallet layer reports trouble, before the gateway maps it onto the
/// user-facing taxonomy.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CapabilityError {
    /// The user (or the wallet on their behalf) declined the request.
    #[error("request rejected by the wallet")]
    Rejected,

    /// The contract executed and reverted; the message is passed through
    /// verbatim.
    #[error("{0}")]
    Reverted(String),

    /// Anything between us and the chain: transport, RPC, dropped
    /// transactions.
    #[error("{0}")]
    Network(String),
}

/// The wallet as an opaque capability: account authorization, network
/// introspection and switching, and calls against the bound factory handle.
///
/// Every method is a suspension point that may wait on the user. There is no
/// cancellation; a dismissed prompt comes back as `Rejected`.
#[async_trait]
pub trait WalletCapability: Send + Sync {
    /// Asks the wallet to authorize an account and binds the contract handle
    /// to its signer. Returns the authorized account.
    async fn request_authorization(&self) -> Result<Address, CapabilityError>;

    /// The chain id the wallet is currently pointed at.
    async fn active_chain_id(&self) -> Result<u64, CapabilityError>;

    /// Asks the wallet to move to `chain_id`. Assumes the chain is already
    /// known to the wallet; an unknown chain is indistinguishable from a
    /// refusal here.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), CapabilityError>;

    /// Issues a read-only call and decodes the result.
    async fn call_read(&self, call: &FactoryCall) -> Result<CallOutput, CapabilityError>;

    /// Submits a state-changing call and waits for the transaction to be
    /// mined, returning the receipt summary with any recognized event.
    async fn call_write(&self, call: &FactoryCall) -> Result<WriteReceipt, CapabilityError>;
}
