use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English};

/// Mnemonic of the development accounts anvil and hardhat fund by default.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Returns the first `count` development signers derived from
/// [`DEV_MNEMONIC`].
pub fn dev_signers(count: u32) -> Vec<PrivateKeySigner> {
    (0..count)
        .map(|i| {
            MnemonicBuilder::<English>::default()
                .phrase(DEV_MNEMONIC)
                .index(i)
                .unwrap()
                .build()
                .unwrap()
        })
        .collect()
}
