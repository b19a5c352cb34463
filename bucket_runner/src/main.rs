use anyhow::Result;
use shared::config::Settings;
use shared::processor::Processor;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    shared::log::init_cli();

    let processor = Processor::connect(Settings::from_env()).await;
    info!(
        bucket = %processor.settings().bucket_name,
        prompt_key = %processor.settings().prompt_key,
        model_id = %processor.settings().model_id,
        "Starting bucket run"
    );
    processor.run_bucket().await?;

    Ok(())
}
