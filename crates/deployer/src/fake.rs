//! In-memory toolkit for exercising the runner without a node.

use {
    crate::toolkit::{
        ConfirmationError,
        ContractAddress,
        ContractFactory,
        DeploymentError,
        PendingDeployment,
        ResolutionError,
        Toolkit,
    },
    alloy::primitives::{Address, B256},
    ethrpc::alloy::errors::testing_rejection_error,
    std::{
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
        time::Duration,
    },
};

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    /// Every deployment confirms at a fresh address.
    Confirmed,
    /// No artifact exists for any contract.
    Unresolvable,
    /// The node refuses the creation transaction.
    Rejected,
    /// The creation transaction never confirms. Waiting gives up after
    /// `timeout`.
    Unconfirmed { timeout: Duration },
}

#[derive(Clone)]
pub struct FakeToolkit {
    outcome: Outcome,
    deployments: Arc<AtomicU64>,
}

impl FakeToolkit {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            deployments: Default::default(),
        }
    }

    /// Number of creation transactions submitted so far.
    pub fn deployments(&self) -> u64 {
        self.deployments.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Toolkit for FakeToolkit {
    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, ResolutionError> {
        match self.outcome {
            Outcome::Unresolvable => Err(ResolutionError::NotFound {
                name: name.to_owned(),
            }),
            _ => Ok(Box::new(self.clone())),
        }
    }
}

#[async_trait::async_trait]
impl ContractFactory for FakeToolkit {
    async fn deploy(&self) -> Result<Box<dyn PendingDeployment>, DeploymentError> {
        if let Outcome::Rejected = self.outcome {
            return Err(DeploymentError::Rejected(testing_rejection_error()));
        }
        let nonce = self.deployments.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Box::new(FakeDeployment {
            outcome: self.outcome,
            nonce,
        }))
    }
}

struct FakeDeployment {
    outcome: Outcome,
    nonce: u64,
}

#[async_trait::async_trait]
impl PendingDeployment for FakeDeployment {
    fn transaction_hash(&self) -> Option<B256> {
        Some(B256::left_padding_from(&self.nonce.to_be_bytes()))
    }

    async fn address(&self) -> Result<ContractAddress, ConfirmationError> {
        if let Outcome::Unconfirmed { timeout } = self.outcome {
            let _ = tokio::time::timeout(timeout, futures::future::pending::<()>()).await;
            return Err(ConfirmationError::Timeout {
                tx: self.transaction_hash().unwrap_or_default(),
            });
        }
        Ok(Address::left_padding_from(&self.nonce.to_be_bytes()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unresolvable_contract() {
        let toolkit = FakeToolkit::new(Outcome::Unresolvable);
        let err = toolkit.contract_factory("MyToken").await.err().unwrap();
        assert!(matches!(err, ResolutionError::NotFound { name } if name == "MyToken"));
        assert_eq!(toolkit.deployments(), 0);
    }
}
