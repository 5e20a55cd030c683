use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = feedcheck::cli::Cli::parse();
    if let Err(e) = feedcheck::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
