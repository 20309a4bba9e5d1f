//! grounded CLI binary entry point.

use clap::Parser;
use grounded::cli::{render, Cli};
use grounded::config::ClientConfig;
use grounded::provider::google::GoogleSearchClient;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.apply(ClientConfig::from_env());
    let client = GoogleSearchClient::new(config)?;

    let prompt = cli.prompt();
    println!("\nQuerying Gemini ({})...\n", client.model());
    println!("PROMPT: {prompt}\n");

    let generation = client.generate(prompt).await?;
    render(&mut std::io::stdout().lock(), &generation)?;
    Ok(())
}
