use crate::{
    error::Failure,
    provider::WalletCapability,
};
use tracing::{
    debug,
    warn,
};

/// Enforces the fixed target chain before any call. The target is a single
/// build-time constant, so this is an equality check, not a negotiation.
#[derive(Clone, Copy, Debug)]
pub struct NetworkGuard {
    expected_chain_id: u64,
}

impl NetworkGuard {
    pub fn new(expected_chain_id: u64) -> Self {
        Self { expected_chain_id }
    }

    pub fn expected_chain_id(&self) -> u64 {
        self.expected_chain_id
    }

    /// Reads the active chain and, on a mismatch, asks the wallet to switch.
    /// Already on the target chain means no switch request at all. A refused
    /// or failed switch is terminal for the operation; the wallet rejecting
    /// an unknown chain looks exactly like the user declining, and we do not
    /// try to tell them apart.
    pub async fn ensure_chain<W: WalletCapability>(&self, wallet: &W) -> Result<(), Failure> {
        let active = wallet.active_chain_id().await.map_err(|err| {
            warn!(error = %err, "could not read active chain id");
            Failure::NetworkSwitchFailed
        })?;
        if active == self.expected_chain_id {
            return Ok(());
        }
        debug!(active, expected = self.expected_chain_id, "requesting chain switch");
        wallet
            .switch_chain(self.expected_chain_id)
            .await
            .map_err(|err| {
                warn!(error = %err, "chain switch was not honored");
                Failure::NetworkSwitchFailed
            })
    }
}
