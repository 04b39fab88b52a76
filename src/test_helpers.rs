use crate::{
    calls::{
        CallOutput,
        FactoryCall,
        WriteReceipt,
    },
    provider::{
        CapabilityError,
        WalletCapability,
    },
};
use async_trait::async_trait;
use ethers::types::Address;
use std::{
    collections::VecDeque,
    sync::{
        Arc,
        Mutex,
        atomic::{
            AtomicUsize,
            Ordering,
        },
    },
};

/// A scripted wallet capability. Authorization and chain switching default
/// to approved; responses to contract calls are queued up front. Clones share
/// state, so tests keep one handle for assertions and give the other away.
#[derive(Clone)]
pub struct MockWallet {
    inner: Arc<MockInner>,
}

struct MockInner {
    chain: Mutex<u64>,
    authorize_response: Mutex<Result<Address, CapabilityError>>,
    switch_response: Mutex<Result<(), CapabilityError>>,
    reads: Mutex<VecDeque<Result<CallOutput, CapabilityError>>>,
    writes: Mutex<VecDeque<Result<WriteReceipt, CapabilityError>>>,
    authorize_requests: AtomicUsize,
    switch_requests: AtomicUsize,
    read_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl MockWallet {
    pub fn on_chain(chain_id: u64) -> Self {
        Self {
            inner: Arc::new(MockInner {
                chain: Mutex::new(chain_id),
                authorize_response: Mutex::new(Ok(Address::from_low_u64_be(0xA11CE))),
                switch_response: Mutex::new(Ok(())),
                reads: Mutex::new(VecDeque::new()),
                writes: Mutex::new(VecDeque::new()),
                authorize_requests: AtomicUsize::new(0),
                switch_requests: AtomicUsize::new(0),
                read_calls: AtomicUsize::new(0),
                write_calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn deny_authorization(self) -> Self {
        *self.inner.authorize_response.lock().unwrap() = Err(CapabilityError::Rejected);
        self
    }

    pub fn deny_chain_switch(self) -> Self {
        *self.inner.switch_response.lock().unwrap() = Err(CapabilityError::Rejected);
        self
    }

    pub fn enqueue_read(self, response: Result<CallOutput, CapabilityError>) -> Self {
        self.inner.reads.lock().unwrap().push_back(response);
        self
    }

    pub fn enqueue_write(self, response: Result<WriteReceipt, CapabilityError>) -> Self {
        self.inner.writes.lock().unwrap().push_back(response);
        self
    }

    pub fn active_chain(&self) -> u64 {
        *self.inner.chain.lock().unwrap()
    }

    pub fn authorize_requests(&self) -> usize {
        self.inner.authorize_requests.load(Ordering::SeqCst)
    }

    pub fn switch_requests(&self) -> usize {
        self.inner.switch_requests.load(Ordering::SeqCst)
    }

    pub fn contract_calls(&self) -> usize {
        self.inner.read_calls.load(Ordering::SeqCst)
            + self.inner.write_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletCapability for MockWallet {
    async fn request_authorization(&self) -> Result<Address, CapabilityError> {
        self.inner.authorize_requests.fetch_add(1, Ordering::SeqCst);
        self.inner.authorize_response.lock().unwrap().clone()
    }

    async fn active_chain_id(&self) -> Result<u64, CapabilityError> {
        Ok(*self.inner.chain.lock().unwrap())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), CapabilityError> {
        self.inner.switch_requests.fetch_add(1, Ordering::SeqCst);
        let response = self.inner.switch_response.lock().unwrap().clone();
        if response.is_ok() {
            *self.inner.chain.lock().unwrap() = chain_id;
        }
        response
    }

    async fn call_read(&self, _call: &FactoryCall) -> Result<CallOutput, CapabilityError> {
        self.inner.read_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .reads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CapabilityError::Network("no scripted read response".into())))
    }

    async fn call_write(&self, _call: &FactoryCall) -> Result<WriteReceipt, CapabilityError> {
        self.inner.write_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .writes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(CapabilityError::Network("no scripted write response".into()))
            })
    }
}
