use {
    crate::toolkit::{
        ConfirmationError,
        ContractAddress,
        DeploymentError,
        ResolutionError,
        Toolkit,
    },
    anyhow::Context,
    std::{io::Write, process::ExitCode},
    thiserror::Error,
    tracing::instrument,
};

/// The contract every run deploys.
pub const CONTRACT_NAME: &str = "MyToken";

/// Step of a deployment. A run walks through them in order and stops at the
/// first failing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Deploying,
    Confirming,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to resolve contract factory")]
    Resolution(#[from] ResolutionError),
    #[error("failed to submit deployment")]
    Deployment(#[from] DeploymentError),
    #[error("failed to confirm deployment")]
    Confirmation(#[from] ConfirmationError),
}

impl Error {
    /// The stage the deployment failed in.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Resolution(_) => Stage::Resolving,
            Self::Deployment(_) => Stage::Deploying,
            Self::Confirmation(_) => Stage::Confirming,
        }
    }
}

/// Outcome of a run, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Exit code 0.
    Deployed,
    /// Exit code 1.
    Failed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Deployed => ExitCode::SUCCESS,
            Status::Failed => ExitCode::FAILURE,
        }
    }
}

/// Deploys a new instance of [`CONTRACT_NAME`] and waits for it to be
/// confirmed. Nothing is cached: every call submits a new deployment.
#[instrument(skip_all, fields(contract = CONTRACT_NAME))]
pub async fn deploy(toolkit: &dyn Toolkit) -> Result<ContractAddress, Error> {
    tracing::debug!(stage = ?Stage::Resolving, "resolving contract factory");
    let factory = toolkit.contract_factory(CONTRACT_NAME).await?;

    tracing::debug!(stage = ?Stage::Deploying, "requesting deployment");
    let pending = factory.deploy().await?;
    if let Some(tx) = pending.transaction_hash() {
        tracing::debug!(?tx, "deployment submitted");
    }

    tracing::debug!(stage = ?Stage::Confirming, "waiting for confirmation");
    let address = pending.address().await?;

    tracing::debug!(%address, "deployment done");
    Ok(address)
}

/// Runs one deployment and reports its result: the deployed address on
/// `stdout` or the full error chain on `stderr`.
pub async fn run(
    toolkit: &dyn Toolkit,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> Status {
    let result = match deploy(toolkit).await {
        Ok(address) => writeln!(stdout, "{CONTRACT_NAME} deployed to: {address}")
            .context("failed to report deployed address"),
        Err(err) => {
            tracing::debug!(stage = ?err.stage(), "deployment failed");
            Err(err.into())
        }
    };

    match result {
        Ok(()) => Status::Deployed,
        Err(err) => {
            // Nothing is left to report to if stderr is gone.
            let _ = writeln!(stderr, "Error: {err:?}");
            Status::Failed
        }
    }
}
