use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use daily_insights::config::{Config, TelemetryConfig};
use daily_insights::llm::{self, azure::AzureOpenAIProvider};
use daily_insights::pipeline;
use daily_insights::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "daily-insights")]
#[command(version)]
#[command(about = "Generate the daily insights report and material tracking status")]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "DAILY_INSIGHTS_CONFIG",
        default_value = "configs/config.yaml"
    )]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let telemetry_guard = init_telemetry(&TelemetryConfig::from_env())?;

    let result = run(&cli).await;

    telemetry_guard.shutdown();

    let outcome = result?;
    println!("Report generated at {}", outcome.report_path.display());
    println!("Material tracking status: {}", outcome.material_status);

    Ok(())
}

async fn run(cli: &Cli) -> anyhow::Result<pipeline::RunOutcome> {
    let config = Config::load(&cli.config)?;

    tracing::info!(
        config = %cli.config.display(),
        model = %config.azure_openai.model,
        output = %config.data_paths.output.display(),
        "Starting daily-insights"
    );

    let provider: Arc<dyn llm::Provider> =
        Arc::new(AzureOpenAIProvider::new(&config.azure_openai));
    let llm_client = llm::LlmClient::new(provider).with_endpoint(&config.azure_openai.endpoint);

    Ok(pipeline::run(&config, &llm_client).await?)
}
