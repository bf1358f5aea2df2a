use {
    alloy::signers::local::PrivateKeySigner,
    anyhow::{Context, Result},
    clap::Parser,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    url::Url,
};

/// Name the configuration is parsed under. The command line itself is never
/// parsed.
const PROGRAM: &str = "deploy";

#[derive(Parser)]
#[clap(about = "Deploys the MyToken contract and prints its address")]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Hex encoded private key signing the deployment transaction. Without it
    /// the first account managed by the node is used, which requires a
    /// development node with unlocked accounts.
    #[clap(long, env)]
    pub private_key: Option<PrivateKeySigner>,

    /// Directory holding the compiled contract artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts_dir: PathBuf,

    /// Number of blocks the deployment transaction must be buried under
    /// before its receipt is considered final.
    #[clap(
        long,
        env,
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub confirmations: u64,

    /// How long to wait for the deployment transaction to be confirmed, e.g.
    /// `30s` or `2m`. Waits indefinitely if unset.
    #[clap(long, env, value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,
}

#[derive(Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,deployer=info")]
    pub log_filter: String,

    /// Output log events as JSON.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

impl Arguments {
    /// Reads the configuration from the environment. Command line arguments
    /// have no influence on the deployment.
    pub fn from_env() -> Result<Self> {
        Self::try_parse_from([PROGRAM]).context("invalid configuration")
    }
}

pub fn display_option(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<impl Display>,
) -> fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}

pub fn display_secret_option<T>(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<T>,
) -> fmt::Result {
    display_option(f, name, &option.as_ref().map(|_| "SECRET"))
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

/// Secret values are printed as "SECRET".
impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            private_key,
            artifacts_dir,
            confirmations,
            confirmation_timeout,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        display_secret_option(f, "private_key", private_key)?;
        writeln!(f, "artifacts_dir: {}", artifacts_dir.display())?;
        writeln!(f, "confirmations: {confirmations}")?;
        display_option(
            f,
            "confirmation_timeout",
            &confirmation_timeout.map(humantime::format_duration),
        )?;
        Ok(())
    }
}
