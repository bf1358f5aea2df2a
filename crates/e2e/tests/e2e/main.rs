// Tests in this binary need a development node (anvil or hardhat) listening
// on 127.0.0.1:8545 and are therefore ignored by default. Run them with
// `cargo test -p e2e -- --ignored`.

mod deploy;
