use crate::{
    error::Failure,
    network::NetworkGuard,
    provider::WalletCapability,
};
use ethers::types::Address;
use std::sync::Arc;
use tracing::{
    info,
    warn,
};

/// An established wallet session: the capability handle (which owns the
/// provider, signer and bound contract) plus the account it authorized.
/// Lives for the process run only; nothing is persisted.
#[derive(Debug)]
pub struct Session<W> {
    wallet: Arc<W>,
    account: Address,
}

impl<W> Session<W> {
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn account(&self) -> Address {
        self.account
    }
}

/// Owns the wallet handle and the (at most one) session built on top of it.
/// The only component allowed to mutate session state.
#[derive(Debug)]
pub struct SessionManager<W> {
    wallet: Option<Arc<W>>,
    session: Option<Session<W>>,
}

impl<W: WalletCapability> SessionManager<W> {
    pub fn new() -> Self {
        Self {
            wallet: None,
            session: None,
        }
    }

    /// Installs the detected wallet capability, if any. Runs once at startup
    /// but is safe to re-invoke: prior handles are overwritten and any
    /// established session is dropped. An absent capability is terminal until
    /// the user installs a wallet; there are no retries.
    pub fn initialize(&mut self, detected: Option<W>) -> Result<(), Failure> {
        self.session = None;
        match detected {
            Some(wallet) => {
                self.wallet = Some(Arc::new(wallet));
                Ok(())
            }
            None => {
                self.wallet = None;
                warn!("no wallet capability detected");
                Err(Failure::ProviderMissing)
            }
        }
    }

    /// Explicit connect: asks the wallet to authorize an account, then lets
    /// the guard settle the network before the session is installed. A
    /// refusal leaves the manager exactly as it was.
    pub async fn connect(&mut self, guard: &NetworkGuard) -> Result<(), Failure> {
        let wallet = self.wallet.clone().ok_or(Failure::ProviderMissing)?;
        let account = wallet.request_authorization().await.map_err(|err| {
            warn!(error = %err, "wallet authorization refused");
            Failure::ConnectionRejected
        })?;
        guard.ensure_chain(wallet.as_ref()).await?;
        info!(account = ?account, "wallet session established");
        self.session = Some(Session { wallet, account });
        Ok(())
    }

    /// Lazily establishes a session for a pending operation. If establishment
    /// fails the operation is abandoned, not queued.
    pub async fn ensure_session(
        &mut self,
        guard: &NetworkGuard,
    ) -> Result<&Session<W>, Failure> {
        if self.session.is_none() {
            self.connect(guard).await?;
        }
        self.session.as_ref().ok_or(Failure::ConnectionRejected)
    }

    pub fn session(&self) -> Option<&Session<W>> {
        self.session.as_ref()
    }
}
