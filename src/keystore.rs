use crate::{
    calls::{
        CallOutput,
        FactoryCall,
        FactoryParameters,
        PoolCreated,
        WriteReceipt,
    },
    deployment::TargetProfile,
    factory_abi::{
        PoolCreatedFilter,
        UniswapV3Factory,
    },
    provider::{
        CapabilityError,
        WalletCapability,
    },
    wallets::{
        WalletDescriptor,
        find_wallet,
        unlock_wallet,
    },
};
use async_trait::async_trait;
use ethers::{
    abi::RawLog,
    contract::{
        ContractError,
        EthLogDecode,
    },
    middleware::SignerMiddleware,
    providers::{
        Http,
        Middleware,
        Provider,
    },
    signers::{
        LocalWallet,
        Signer,
    },
    types::{
        Address,
        TransactionReceipt,
    },
};
use std::{
    path::Path,
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::info;

type BoundFactory = UniswapV3Factory<SignerMiddleware<Provider<Http>, LocalWallet>>;

/// The production wallet capability: an HTTP provider plus an encrypted
/// keystore standing in for the browser wallet. Authorization means
/// unlocking the keystore interactively; the contract handle is bound the
/// moment a signer exists.
pub struct KeystoreWallet {
    provider: Provider<Http>,
    descriptor: WalletDescriptor,
    factory_address: Address,
    chain_id: u64,
    bound: RwLock<Option<BoundFactory>>,
}

impl KeystoreWallet {
    /// Detection: a named keystore file must exist and the target RPC URL and
    /// factory address must be well-formed. Anything short of that reads as
    /// "no wallet installed".
    pub fn detect(target: &TargetProfile, wallet_dir: &Path, wallet_name: &str) -> Option<Self> {
        let descriptor = find_wallet(wallet_dir, wallet_name).ok()?;
        let provider = Provider::<Http>::try_from(target.rpc_url.as_str()).ok()?;
        let factory_address = target.factory.parse::<Address>().ok()?;
        Some(Self {
            provider,
            descriptor,
            factory_address,
            chain_id: target.chain_id,
            bound: RwLock::new(None),
        })
    }

    async fn bound_factory(&self) -> Result<BoundFactory, CapabilityError> {
        self.bound
            .read()
            .await
            .clone()
            .ok_or_else(|| CapabilityError::Network("no authorized signer; connect first".into()))
    }
}

#[async_trait]
impl WalletCapability for KeystoreWallet {
    async fn request_authorization(&self) -> Result<Address, CapabilityError> {
        // A failed or abandoned password prompt is the keystore equivalent of
        // the user dismissing the wallet popup.
        let wallet =
            unlock_wallet(&self.descriptor).map_err(|_| CapabilityError::Rejected)?;
        let wallet = wallet.with_chain_id(self.chain_id);
        let account = wallet.address();
        let middleware = Arc::new(SignerMiddleware::new(self.provider.clone(), wallet));
        let factory = UniswapV3Factory::new(self.factory_address, middleware);
        *self.bound.write().await = Some(factory);
        info!(account = ?account, "keystore wallet unlocked");
        Ok(account)
    }

    async fn active_chain_id(&self) -> Result<u64, CapabilityError> {
        self.provider
            .get_chainid()
            .await
            .map(|id| id.as_u64())
            .map_err(|err| CapabilityError::Network(err.to_string()))
    }

    /// An HTTP endpoint is pinned to one network, so "switching" can only
    /// re-verify what the endpoint already serves. A mismatch is reported as
    /// a refused switch.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), CapabilityError> {
        let active = self.active_chain_id().await?;
        if active == chain_id {
            Ok(())
        } else {
            Err(CapabilityError::Rejected)
        }
    }

    async fn call_read(&self, call: &FactoryCall) -> Result<CallOutput, CapabilityError> {
        let factory = self.bound_factory().await?;
        match call {
            FactoryCall::GetPool {
                token_a,
                token_b,
                fee,
            } => {
                let pool = factory
                    .get_pool(*token_a, *token_b, *fee)
                    .call()
                    .await
                    .map_err(contract_error)?;
                Ok(CallOutput::PoolAddress(pool))
            }
            FactoryCall::FeeAmountTickSpacing { fee } => {
                let spacing = factory
                    .fee_amount_tick_spacing(*fee)
                    .call()
                    .await
                    .map_err(contract_error)?;
                Ok(CallOutput::TickSpacing(spacing))
            }
            FactoryCall::Parameters => {
                let (factory_addr, token0, token1, fee, tick_spacing) = factory
                    .parameters()
                    .call()
                    .await
                    .map_err(contract_error)?;
                Ok(CallOutput::Parameters(FactoryParameters {
                    factory: factory_addr,
                    token0,
                    token1,
                    fee,
                    tick_spacing,
                }))
            }
            FactoryCall::CreatePool { .. } => Err(CapabilityError::Network(
                "createPool is not a read call".into(),
            )),
        }
    }

    async fn call_write(&self, call: &FactoryCall) -> Result<WriteReceipt, CapabilityError> {
        let factory = self.bound_factory().await?;
        match call {
            FactoryCall::CreatePool {
                token_a,
                token_b,
                fee,
            } => {
                let call = factory.create_pool(*token_a, *token_b, *fee);
                let pending = call.send().await.map_err(contract_error)?;
                let receipt = pending
                    .await
                    .map_err(|err| CapabilityError::Network(err.to_string()))?
                    .ok_or_else(|| {
                        CapabilityError::Network(
                            "transaction dropped before confirmation".into(),
                        )
                    })?;
                Ok(WriteReceipt {
                    tx_hash: format!("{:?}", receipt.transaction_hash),
                    pool_created: decode_pool_created(&receipt),
                })
            }
            _ => Err(CapabilityError::Network(format!(
                "{} is not a write call",
                call.name()
            ))),
        }
    }
}

fn decode_pool_created(receipt: &TransactionReceipt) -> Option<PoolCreated> {
    receipt
        .logs
        .iter()
        .find_map(|log| {
            let raw = RawLog {
                topics: log.topics.clone(),
                data: log.data.to_vec(),
            };
            PoolCreatedFilter::decode_log(&raw).ok()
        })
        .map(|event| PoolCreated {
            token0: event.token_0,
            token1: event.token_1,
            fee: event.fee,
            tick_spacing: event.tick_spacing,
            pool: event.pool,
        })
}

fn contract_error<M: Middleware>(err: ContractError<M>) -> CapabilityError {
    if err.as_revert().is_some() {
        let message = err
            .decode_revert::<String>()
            .unwrap_or_else(|| err.to_string());
        CapabilityError::Reverted(message)
    } else {
        CapabilityError::Network(err.to_string())
    }
}
