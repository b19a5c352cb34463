use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use shared::bedrock::BedrockModel;
use shared::config::Settings;
use shared::event::targets;
use shared::model::TextModel;
use shared::processor::Processor;
use shared::s3::S3Store;
use shared::store::ObjectStore;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    shared::log::init();

    let processor: Processor<S3Store, BedrockModel> = Processor::connect(Settings::from_env()).await;
    info!(
        prompt_key = %processor.settings().prompt_key,
        model_id = %processor.settings().model_id,
        "Starting object handler"
    );

    lambda_runtime::run(service_fn(|event| func(event, &processor))).await?;
    Ok(())
}

async fn func<S, M>(event: LambdaEvent<S3Event>, processor: &Processor<S, M>) -> Result<(), Error>
where
    S: ObjectStore,
    M: TextModel,
{
    let payload = event.payload;
    if payload.records.is_empty() {
        warn!("No records found in S3 event");
    }

    let targets = targets(&payload)?;
    processor.handle_records(&targets).await?;

    Ok(())
}
