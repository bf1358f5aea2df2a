pub mod arguments;
pub mod artifact;
#[cfg(test)]
mod fake;
pub mod node;
pub mod runner;
pub mod toolkit;

pub use runner::{CONTRACT_NAME, Status};

use {
    crate::{arguments::Arguments, node::NodeToolkit},
    std::{
        ffi::OsString,
        io::{self, Write},
    },
};

/// Deploys [`CONTRACT_NAME`] using the configuration found in the environment.
/// `args` are only logged, they never change what gets deployed.
pub async fn start(args: impl IntoIterator<Item = OsString>) -> Status {
    let arguments = match Arguments::from_env() {
        Ok(arguments) => arguments,
        Err(err) => {
            let _ = writeln!(io::stderr(), "Error: {err:?}");
            return Status::Failed;
        }
    };

    observe::tracing::initialize(&observe::Config::new(
        &arguments.logging.log_filter,
        arguments.logging.use_json_logs,
    ));
    let ignored = args.into_iter().skip(1).collect::<Vec<_>>();
    if !ignored.is_empty() {
        tracing::debug!(?ignored, "ignoring command line arguments");
    }
    tracing::debug!("running deployer with validated arguments:\n{}", arguments);

    let toolkit = NodeToolkit::new(&arguments);
    runner::run(&toolkit, &mut io::stdout(), &mut io::stderr()).await
}
