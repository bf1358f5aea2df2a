use {
    crate::nodes::{NODE_HOST, Resetter},
    clap::Parser,
    deployer::{Status, arguments::Arguments, node::NodeToolkit, runner},
    ethrpc::AlloyProvider,
    futures::FutureExt,
    std::{
        future::Future,
        panic::{self, AssertUnwindSafe},
        sync::Mutex,
    },
    url::Url,
};

/// Compiled artifacts shared with the deployer's own tests.
pub const ARTIFACTS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../deployer/tests/fixtures/artifacts"
);

static NODE_MUTEX: Mutex<()> = Mutex::new(());

/// Runs `f` against the local testing node. A snapshot of the chain is taken
/// before the test and restored afterwards, even if the test panics.
///
/// Tests calling this function never run simultaneously.
pub async fn run_test<F, Fut>(f: F)
where
    F: FnOnce(AlloyProvider) -> Fut,
    Fut: Future<Output = ()>,
{
    observe::tracing::initialize_reentrant("warn,deployer=debug,e2e=debug");

    // The mutex is expected to become poisoned if a test panics. Only the
    // locked state matters, not the data.
    let _lock = NODE_MUTEX.lock();

    let provider = ethrpc::alloy::provider(&node_url(), None);
    let resetter = Resetter::new(&provider).await;

    let result = AssertUnwindSafe(f(provider)).catch_unwind().await;

    resetter.reset().await;

    if let Err(err) = result {
        panic::resume_unwind(err);
    }
}

pub fn node_url() -> Url {
    NODE_HOST.parse().unwrap()
}

/// Result of one deployment run.
pub struct Deployment {
    pub status: Status,
    pub stdout: String,
    pub stderr: String,
}

impl Deployment {
    /// The address printed on a successful run.
    pub fn address(&self) -> &str {
        self.stdout
            .trim_end()
            .strip_prefix("MyToken deployed to: ")
            .unwrap_or_else(|| panic!("unexpected output: {:?}", self.stdout))
    }
}

/// Deploys the fixture contract against the local node. `extra` are
/// additional `--flag value` settings.
pub async fn deploy(extra: &[&str]) -> Deployment {
    let node_url = node_url();
    let args = ["deploy", "--node-url", node_url.as_str(), "--artifacts-dir", ARTIFACTS]
        .into_iter()
        .chain(extra.iter().copied());
    let args = Arguments::try_parse_from(args).unwrap();
    let toolkit = NodeToolkit::new(&args);

    let (mut stdout, mut stderr) = (Vec::new(), Vec::new());
    let status = runner::run(&toolkit, &mut stdout, &mut stderr).await;
    Deployment {
        status,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}
