#![allow(non_snake_case)]

use factory_client::{
    TARGET_CHAIN_ID,
    calls::{
        Operation,
        OperationRequest,
    },
    error::Failure,
    gateway::ContractGateway,
    network::NetworkGuard,
    session::SessionManager,
    test_helpers::MockWallet,
};

#[tokio::test]
async fn missing_provider__only_observable_effect_is_the_error() {
    // given no wallet capability was detected at startup
    let mut gateway = ContractGateway::<MockWallet>::new(None, TARGET_CHAIN_ID);
    assert_eq!(gateway.state().error(), Some(&Failure::ProviderMissing));

    // when any operation is triggered
    let request = OperationRequest::new(Operation::FeeAmountTickSpacing).fee(500);
    gateway.execute(request).await;

    // then the error persists and no session or result ever appears
    assert_eq!(gateway.state().error(), Some(&Failure::ProviderMissing));
    assert_eq!(gateway.state().result(), None);
    assert!(gateway.sessions().session().is_none());
}

#[tokio::test]
async fn missing_provider__error_survives_repeated_operations() {
    let mut gateway = ContractGateway::<MockWallet>::new(None, TARGET_CHAIN_ID);

    for _ in 0..3 {
        gateway
            .execute(OperationRequest::new(Operation::Parameters))
            .await;
        assert_eq!(gateway.state().error(), Some(&Failure::ProviderMissing));
    }
}

#[tokio::test]
async fn connect__rejection_sets_error_and_leaves_no_session() {
    // given a wallet that will refuse authorization
    let wallet = MockWallet::on_chain(TARGET_CHAIN_ID).deny_authorization();
    let mut gateway = ContractGateway::new(Some(wallet.clone()), TARGET_CHAIN_ID);

    // when an operation forces a lazy connect
    gateway
        .execute(OperationRequest::new(Operation::Parameters))
        .await;

    // then the operation is abandoned before any contract interaction
    assert_eq!(gateway.state().error(), Some(&Failure::ConnectionRejected));
    assert!(gateway.sessions().session().is_none());
    assert_eq!(wallet.contract_calls(), 0);
}

#[tokio::test]
async fn connect__retry_after_rejection_can_succeed() {
    let guard = NetworkGuard::new(TARGET_CHAIN_ID);
    let mut sessions = SessionManager::new();
    let denied = MockWallet::on_chain(TARGET_CHAIN_ID).deny_authorization();
    sessions.initialize(Some(denied)).unwrap();
    assert_eq!(
        sessions.connect(&guard).await,
        Err(Failure::ConnectionRejected)
    );

    // a fresh user-triggered connect against an approving wallet succeeds
    let approved = MockWallet::on_chain(TARGET_CHAIN_ID);
    sessions.initialize(Some(approved)).unwrap();
    sessions.connect(&guard).await.unwrap();

    assert!(sessions.session().is_some());
}

#[tokio::test]
async fn initialize__reinvocation_overwrites_handles_and_drops_session() {
    let guard = NetworkGuard::new(TARGET_CHAIN_ID);
    let mut sessions = SessionManager::new();
    sessions
        .initialize(Some(MockWallet::on_chain(TARGET_CHAIN_ID)))
        .unwrap();
    sessions.connect(&guard).await.unwrap();
    assert!(sessions.session().is_some());

    // re-initialization is idempotent but starts from a clean slate
    sessions
        .initialize(Some(MockWallet::on_chain(TARGET_CHAIN_ID)))
        .unwrap();

    assert!(sessions.session().is_none());
}

#[tokio::test]
async fn initialize__absent_capability_clears_prior_wallet() {
    let guard = NetworkGuard::new(TARGET_CHAIN_ID);
    let mut sessions = SessionManager::new();
    sessions
        .initialize(Some(MockWallet::on_chain(TARGET_CHAIN_ID)))
        .unwrap();

    assert_eq!(sessions.initialize(None), Err(Failure::ProviderMissing));
    assert_eq!(
        sessions.connect(&guard).await,
        Err(Failure::ProviderMissing)
    );
}
