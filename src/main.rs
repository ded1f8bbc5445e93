use cottonaid_client::app;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    app::main().await
}
