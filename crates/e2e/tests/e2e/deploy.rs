use {
    alloy::{
        primitives::{Address, Bytes, hex},
        providers::Provider,
    },
    deployer::Status,
    e2e::setup::{deploy, run_test},
    ethrpc::{AlloyProvider, alloy::wallet::dev_signers},
};

/// Runtime code of the fixture contract. It returns 42 on every call.
const RUNTIME: [u8; 10] = [0x60, 0x2a, 0x60, 0x00, 0x52, 0x60, 0x20, 0x60, 0x00, 0xf3];

#[tokio::test]
#[ignore]
async fn local_node_deploys_with_node_account() {
    run_test(deploys_with_node_account).await;
}

async fn deploys_with_node_account(provider: AlloyProvider) {
    let deployment = deploy(&[]).await;

    assert_eq!(deployment.status, Status::Deployed, "{}", deployment.stderr);
    assert_eq!(deployment.stderr, "");
    let address: Address = deployment.address().parse().unwrap();
    assert_eq!(deployment.address(), address.to_checksum(None));

    let code = provider.get_code_at(address).await.unwrap();
    assert_eq!(code, Bytes::from_static(&RUNTIME));
}

#[tokio::test]
#[ignore]
async fn local_node_deploys_with_private_key() {
    run_test(deploys_with_private_key).await;
}

async fn deploys_with_private_key(provider: AlloyProvider) {
    let signer = dev_signers(2).pop().unwrap();
    let nonce = provider
        .get_transaction_count(signer.address())
        .await
        .unwrap();
    let key = hex::encode_prefixed(signer.to_bytes());

    let deployment = deploy(&["--private-key", &key]).await;

    assert_eq!(deployment.status, Status::Deployed, "{}", deployment.stderr);
    let address: Address = deployment.address().parse().unwrap();
    assert_eq!(address, signer.address().create(nonce));
}

#[tokio::test]
#[ignore]
async fn local_node_redeploys_on_every_run() {
    run_test(redeploys_on_every_run).await;
}

async fn redeploys_on_every_run(_provider: AlloyProvider) {
    let first = deploy(&[]).await;
    let second = deploy(&[]).await;

    assert_eq!(first.status, Status::Deployed, "{}", first.stderr);
    assert_eq!(second.status, Status::Deployed, "{}", second.stderr);
    assert_ne!(first.address(), second.address());
}

#[tokio::test]
#[ignore]
async fn local_node_waits_for_confirmations() {
    run_test(waits_for_confirmations).await;
}

async fn waits_for_confirmations(provider: AlloyProvider) {
    let deployment = deploy(&["--confirmations", "1", "--confirmation-timeout", "30s"]).await;

    assert_eq!(deployment.status, Status::Deployed, "{}", deployment.stderr);
    let address: Address = deployment.address().parse().unwrap();
    assert!(!provider.get_code_at(address).await.unwrap().is_empty());
}
