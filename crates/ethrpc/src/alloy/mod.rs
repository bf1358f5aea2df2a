pub mod errors;
mod instrumentation;
#[cfg(any(test, feature = "test-util"))]
pub mod wallet;

use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
        signers::local::PrivateKeySigner,
    },
    instrumentation::InstrumentationLayer,
    url::Url,
};

/// Creates a provider talking to the node at `url`.
///
/// Transactions are signed locally by `signer` when one is given. Without a
/// signer they are handed to the node unsigned (`eth_sendTransaction`), which
/// only works for accounts the node manages itself, e.g. the unlocked
/// development accounts of anvil or hardhat.
pub fn provider(url: &Url, signer: Option<PrivateKeySigner>) -> AlloyProvider {
    let rpc = ClientBuilder::default()
        .layer(InstrumentationLayer {
            label: "main".into(),
        })
        .http(url.clone());

    match signer {
        Some(signer) => ProviderBuilder::new()
            .wallet(EthereumWallet::new(signer))
            .connect_client(rpc)
            .erased(),
        None => ProviderBuilder::new().connect_client(rpc).erased(),
    }
}
