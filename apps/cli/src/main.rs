//! `costwise` binary entry point.

#[tokio::main]
async fn main() {
    let code = costwise_cli::run().await;
    std::process::exit(code);
}
