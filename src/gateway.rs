use crate::{
    calls::{
        CallOutput,
        FactoryCall,
        Mutability,
        OperationRequest,
        WriteReceipt,
    },
    error::Failure,
    network::NetworkGuard,
    provider::{
        CapabilityError,
        WalletCapability,
    },
    session::SessionManager,
    state::InteractionState,
};
use tracing::{
    error,
    info,
};

/// Orchestrates one operation end to end: lazy session establishment, chain
/// verification, the call itself, and the projection of the outcome into
/// `InteractionState`.
///
/// Operations run one at a time through `&mut self`; there is no way to race
/// two calls against the same gateway. Failures never escape: every awaited
/// step is mapped onto the closed `Failure` taxonomy.
pub struct ContractGateway<W: WalletCapability> {
    sessions: SessionManager<W>,
    guard: NetworkGuard,
    state: InteractionState,
    last_receipt: Option<WriteReceipt>,
}

impl<W: WalletCapability> ContractGateway<W> {
    /// Builds the gateway around the wallet capability detected at startup.
    /// An absent capability leaves a persistent `ProviderMissing` error in
    /// the state; every subsequent operation re-surfaces it.
    pub fn new(detected: Option<W>, expected_chain_id: u64) -> Self {
        let mut sessions = SessionManager::new();
        let mut state = InteractionState::default();
        if let Err(failure) = sessions.initialize(detected) {
            state.set_error(failure);
        }
        Self {
            sessions,
            guard: NetworkGuard::new(expected_chain_id),
            state,
            last_receipt: None,
        }
    }

    /// Types the raw request and runs it. Malformed input degrades to an
    /// error-state update like any other failure.
    pub async fn execute(&mut self, request: OperationRequest) {
        match request.into_call() {
            Ok(call) => self.dispatch(call).await,
            Err(failure) => self.state.set_error(failure),
        }
    }

    /// Runs a typed call to completion and records the outcome. Terminal
    /// either way; nothing is retried or queued.
    pub async fn dispatch(&mut self, call: FactoryCall) {
        info!(function = call.name(), "dispatching operation");
        match self.run(call).await {
            Ok(output) => self.state.set_result(output),
            Err(failure) => {
                error!(%failure, "operation failed");
                self.state.set_error(failure);
            }
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Receipt of the most recent confirmed write, event or not.
    pub fn last_receipt(&self) -> Option<&WriteReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn sessions(&self) -> &SessionManager<W> {
        &self.sessions
    }

    async fn run(&mut self, call: FactoryCall) -> Result<CallOutput, Failure> {
        // Calls are never attempted without a bound contract handle: connect
        // on demand and abandon the operation if that fails.
        let session = self.sessions.ensure_session(&self.guard).await?;
        let wallet = session.wallet();
        self.guard.ensure_chain(wallet).await?;
        match call.mutability() {
            Mutability::Read => wallet.call_read(&call).await.map_err(call_failure),
            Mutability::Write => {
                let receipt = wallet.call_write(&call).await.map_err(call_failure)?;
                self.last_receipt = Some(receipt.clone());
                match receipt.pool_created {
                    Some(event) => Ok(CallOutput::PoolAddress(event.pool)),
                    None => Err(Failure::AmbiguousOutcome(receipt.tx_hash)),
                }
            }
        }
    }
}

fn call_failure(err: CapabilityError) -> Failure {
    match err {
        CapabilityError::Reverted(message) => Failure::CallReverted(message),
        CapabilityError::Network(message) => Failure::CallNetworkError(message),
        CapabilityError::Rejected => {
            Failure::CallNetworkError("request rejected by the wallet".into())
        }
    }
}
