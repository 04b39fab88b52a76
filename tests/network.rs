#![allow(non_snake_case)]

use factory_client::{
    TARGET_CHAIN_ID,
    calls::{
        CallOutput,
        Operation,
        OperationRequest,
    },
    error::Failure,
    gateway::ContractGateway,
    network::NetworkGuard,
    test_helpers::MockWallet,
};

#[tokio::test]
async fn ensure_chain__matching_chain_requests_no_switch() {
    let guard = NetworkGuard::new(TARGET_CHAIN_ID);
    let wallet = MockWallet::on_chain(TARGET_CHAIN_ID);

    guard.ensure_chain(&wallet).await.unwrap();

    assert_eq!(wallet.switch_requests(), 0);
    assert_eq!(wallet.active_chain(), TARGET_CHAIN_ID);
}

#[tokio::test]
async fn ensure_chain__is_idempotent_once_on_the_target_chain() {
    let guard = NetworkGuard::new(TARGET_CHAIN_ID);
    let wallet = MockWallet::on_chain(1);

    guard.ensure_chain(&wallet).await.unwrap();
    guard.ensure_chain(&wallet).await.unwrap();
    guard.ensure_chain(&wallet).await.unwrap();

    // only the first pass needed a switch
    assert_eq!(wallet.switch_requests(), 1);
    assert_eq!(wallet.active_chain(), TARGET_CHAIN_ID);
}

#[tokio::test]
async fn ensure_chain__approved_switch_moves_the_wallet() {
    let guard = NetworkGuard::new(TARGET_CHAIN_ID);
    let wallet = MockWallet::on_chain(1);

    guard.ensure_chain(&wallet).await.unwrap();

    assert_eq!(wallet.switch_requests(), 1);
    assert_eq!(wallet.active_chain(), TARGET_CHAIN_ID);
}

#[tokio::test]
async fn ensure_chain__rejected_switch_is_a_switch_failure() {
    let guard = NetworkGuard::new(TARGET_CHAIN_ID);
    let wallet = MockWallet::on_chain(1).deny_chain_switch();

    let err = guard.ensure_chain(&wallet).await.unwrap_err();

    assert_eq!(err, Failure::NetworkSwitchFailed);
    assert_eq!(wallet.active_chain(), 1);
}

#[tokio::test]
async fn gateway__switch_failure_means_no_call_is_attempted() {
    // given a wallet stuck on the wrong network
    let wallet = MockWallet::on_chain(1)
        .deny_chain_switch()
        .enqueue_read(Ok(CallOutput::TickSpacing(10)));
    let mut gateway = ContractGateway::new(Some(wallet.clone()), TARGET_CHAIN_ID);

    // when a read is triggered
    gateway
        .execute(OperationRequest::new(Operation::FeeAmountTickSpacing).fee(500))
        .await;

    // then the switch was requested before any call, and its failure aborted
    // the operation
    assert_eq!(wallet.switch_requests(), 1);
    assert_eq!(wallet.contract_calls(), 0);
    assert_eq!(gateway.state().error(), Some(&Failure::NetworkSwitchFailed));
    assert_eq!(gateway.state().result(), None);
}
