use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    badgey_bot::run().await
}
