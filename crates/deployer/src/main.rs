use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    deployer::start(std::env::args_os()).await.into()
}
