//! Trait definitions for the blockchain toolkit the runner deploys through.
//!
//! These traits abstract artifact resolution and chain interactions to enable
//! unit testing with mocks.

use {
    alloy::{
        primitives::{Address, B256},
        providers::PendingTransactionError,
        transports::TransportError,
    },
    ethrpc::alloy::errors::RpcErrorExt,
    std::{fmt, path::PathBuf},
    thiserror::Error,
};

/// Address of a deployed contract in the toolkit's canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }
}

impl From<Address> for ContractAddress {
    /// Uses the EIP-55 checksummed representation.
    fn from(address: Address) -> Self {
        Self(address.to_checksum(None))
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entry point of the toolkit: turns contract names into factories.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Toolkit: Send + Sync {
    /// Resolves the compiled artifact of the named contract. `name` is either
    /// a bare contract name or a fully qualified `path/To.sol:Name`.
    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, ResolutionError>;
}

/// A compiled contract that can be deployed.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContractFactory: Send + Sync {
    /// Submits a creation transaction for a new instance of the contract.
    /// Every call submits a new transaction.
    async fn deploy(&self) -> Result<Box<dyn PendingDeployment>, DeploymentError>;
}

/// A submitted creation transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PendingDeployment: Send + Sync {
    /// Hash of the creation transaction, if the toolkit exposes one.
    fn transaction_hash(&self) -> Option<B256>;

    /// Waits until the creation transaction is confirmed and returns the
    /// address of the new contract.
    async fn address(&self) -> Result<ContractAddress, ConfirmationError>;
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact for contract {name:?} not found")]
    NotFound { name: String },
    #[error(
        "multiple artifacts for contract {name:?}, use a fully qualified name: {}",
        .candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("artifact {} is malformed", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {} contains invalid bytecode", .path.display())]
    InvalidBytecode {
        path: PathBuf,
        #[source]
        source: alloy::primitives::hex::FromHexError,
    },
    #[error("contract {name:?} is abstract or an interface and cannot be deployed")]
    Abstract { name: String },
    #[error(
        "contract {name:?} must be linked against libraries before deployment: {}",
        .libraries.join(", ")
    )]
    Unlinked {
        name: String,
        libraries: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("constructor of {name:?} expects {expected} arguments but none are given")]
    ConstructorArguments { name: String, expected: usize },
    #[error("no private key configured and the node manages no accounts")]
    NoAccount,
    #[error("node rejected the request")]
    Rejected(#[source] TransportError),
    #[error("failed to reach node")]
    Unreachable(#[source] TransportError),
}

impl DeploymentError {
    /// Tells apart errors the node answered with from errors where the node
    /// could not be reached at all.
    pub fn from_rpc(err: TransportError) -> Self {
        if err.is_rejection() {
            Self::Rejected(err)
        } else {
            Self::Unreachable(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error("timed out waiting for deployment transaction {tx} to be confirmed")]
    Timeout { tx: B256 },
    #[error("failed to watch deployment transaction {tx}")]
    Node {
        tx: B256,
        #[source]
        source: PendingTransactionError,
    },
    #[error("deployment transaction {tx} reverted")]
    Reverted { tx: B256 },
    #[error("receipt of deployment transaction {tx} carries no contract address")]
    MissingAddress { tx: B256 },
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::address,
        ethrpc::alloy::errors::{testing_rejection_error, testing_transport_error},
    };

    #[test]
    fn address_uses_checksum_representation() {
        let address = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
        assert_eq!(
            ContractAddress::from(address).to_string(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[test]
    fn rpc_errors_are_classified() {
        assert!(matches!(
            DeploymentError::from_rpc(testing_rejection_error()),
            DeploymentError::Rejected(_)
        ));
        assert!(matches!(
            DeploymentError::from_rpc(testing_transport_error()),
            DeploymentError::Unreachable(_)
        ));
    }
}
