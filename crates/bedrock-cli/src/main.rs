use anyhow::Result;
use bedrock_cli::{BedrockApp, CliArgs};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let app = BedrockApp::from_args(&args)?;
    app.run(args).await?;
    Ok(())
}
