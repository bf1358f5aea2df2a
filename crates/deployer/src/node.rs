//! Toolkit deploying through an Ethereum JSON-RPC node.

use {
    crate::{
        arguments::Arguments,
        artifact::{self, Artifact},
        toolkit::{
            ConfirmationError,
            ContractAddress,
            ContractFactory,
            DeploymentError,
            PendingDeployment,
            ResolutionError,
            Toolkit,
        },
    },
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, B256},
        providers::{PendingTransactionBuilder, PendingTransactionError, Provider, WatchTxError},
        rpc::types::{TransactionReceipt, TransactionRequest},
    },
    ethrpc::AlloyProvider,
    std::{path::PathBuf, time::Duration},
};

#[derive(Clone)]
pub struct NodeToolkit {
    provider: AlloyProvider,
    /// Address of the locally configured signer, if any.
    signer: Option<Address>,
    artifacts_dir: PathBuf,
    confirmations: u64,
    confirmation_timeout: Option<Duration>,
}

impl NodeToolkit {
    pub fn new(args: &Arguments) -> Self {
        let signer = args.private_key.clone();
        Self {
            signer: signer.as_ref().map(|signer| signer.address()),
            provider: ethrpc::alloy::provider(&args.node_url, signer),
            artifacts_dir: args.artifacts_dir.clone(),
            confirmations: args.confirmations,
            confirmation_timeout: args.confirmation_timeout,
        }
    }

    /// The account deployments are sent from: the configured signer or, like
    /// Hardhat does on development networks, the first account the node
    /// manages.
    async fn sender(&self) -> Result<Address, DeploymentError> {
        if let Some(signer) = self.signer {
            return Ok(signer);
        }
        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(DeploymentError::from_rpc)?;
        accounts.first().copied().ok_or(DeploymentError::NoAccount)
    }
}

#[async_trait::async_trait]
impl Toolkit for NodeToolkit {
    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, ResolutionError> {
        let artifact = artifact::resolve(&self.artifacts_dir, name)?;
        tracing::debug!(
            contract = %artifact.contract_name,
            source = ?artifact.source_name,
            bytecode_len = artifact.bytecode.len(),
            "resolved artifact"
        );
        Ok(Box::new(NodeFactory {
            toolkit: self.clone(),
            artifact,
        }))
    }
}

struct NodeFactory {
    toolkit: NodeToolkit,
    artifact: Artifact,
}

#[async_trait::async_trait]
impl ContractFactory for NodeFactory {
    async fn deploy(&self) -> Result<Box<dyn PendingDeployment>, DeploymentError> {
        let expected = self
            .artifact
            .abi
            .constructor()
            .map_or(0, |constructor| constructor.inputs.len());
        if expected > 0 {
            return Err(DeploymentError::ConstructorArguments {
                name: self.artifact.contract_name.clone(),
                expected,
            });
        }

        let from = self.toolkit.sender().await?;
        let tx = TransactionRequest::default()
            .from(from)
            .with_deploy_code(self.artifact.bytecode.clone());
        let pending = self
            .toolkit
            .provider
            .send_transaction(tx)
            .await
            .map_err(DeploymentError::from_rpc)?;

        let tx = *pending.tx_hash();
        tracing::info!(
            contract = %self.artifact.contract_name,
            ?from,
            ?tx,
            "submitted deployment transaction"
        );
        Ok(Box::new(NodeDeployment {
            toolkit: self.toolkit.clone(),
            tx,
        }))
    }
}

struct NodeDeployment {
    toolkit: NodeToolkit,
    tx: B256,
}

#[async_trait::async_trait]
impl PendingDeployment for NodeDeployment {
    fn transaction_hash(&self) -> Option<B256> {
        Some(self.tx)
    }

    async fn address(&self) -> Result<ContractAddress, ConfirmationError> {
        let tx = self.tx;
        let receipt = PendingTransactionBuilder::new(self.toolkit.provider.root().clone(), tx)
            .with_required_confirmations(self.toolkit.confirmations)
            .with_timeout(self.toolkit.confirmation_timeout)
            .get_receipt()
            .await
            .map_err(|err| confirmation_error(tx, err))?;

        let address = created_contract(tx, &receipt)?;
        tracing::info!(
            ?tx,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            %address,
            "deployment confirmed"
        );
        Ok(address.into())
    }
}

fn confirmation_error(tx: B256, err: PendingTransactionError) -> ConfirmationError {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            ConfirmationError::Timeout { tx }
        }
        source => ConfirmationError::Node { tx, source },
    }
}

/// Address of the contract the creation transaction `tx` produced.
fn created_contract(tx: B256, receipt: &TransactionReceipt) -> Result<Address, ConfirmationError> {
    if !receipt.status() {
        return Err(ConfirmationError::Reverted { tx });
    }
    receipt
        .contract_address
        .ok_or(ConfirmationError::MissingAddress { tx })
}
