use crate::bedrock::BedrockModel;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::event::Target;
use crate::model::TextModel;
use crate::s3::S3Store;
use crate::store::ObjectStore;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The object was the prompt itself.
    Skipped,
    Evaluated { response: String },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub evaluated: usize,
    pub skipped: usize,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Evaluated { .. } => self.evaluated += 1,
        }
    }
}

/// Evaluates objects against the bucket's prompt object. Built once per process.
pub struct Processor<S, M> {
    store: S,
    model: M,
    settings: Settings,
}

impl Processor<S3Store, BedrockModel> {
    /// Loads AWS configuration from the environment and builds both clients.
    pub async fn connect(settings: Settings) -> Self {
        let aws_config = aws_config::load_from_env().await;
        let store = S3Store::new(aws_sdk_s3::Client::new(&aws_config));
        let model = BedrockModel::new(
            aws_sdk_bedrockruntime::Client::new(&aws_config),
            settings.model_id.clone(),
        );

        Self::new(store, model, settings)
    }
}

impl<S, M> Processor<S, M>
where
    S: ObjectStore,
    M: TextModel,
{
    pub fn new(store: S, model: M, settings: Settings) -> Self {
        Self {
            store,
            model,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn process(&self, bucket: &str, key: &str) -> Result<Outcome> {
        if key == self.settings.prompt_key {
            info!(bucket, key, "Prompt file uploaded, ignoring.");
            return Ok(Outcome::Skipped);
        }

        // Re-read on every call: the prompt may be replaced between uploads.
        let prompt = self.store.read(bucket, &self.settings.prompt_key).await?;

        info!(bucket, key, model_id = self.model.model_id(), "Processing object");
        let text = self.store.read(bucket, key).await?;
        let response = self.model.generate(&prompt, &text).await?;
        info!(bucket, key, response = %response, "Response");

        Ok(Outcome::Evaluated { response })
    }

    /// Processes notification targets in order, stopping at the first failure.
    pub async fn handle_records(&self, targets: &[Target]) -> Result<Summary> {
        let mut summary = Summary::default();

        for (position, (bucket, key)) in targets.iter().enumerate() {
            let outcome = self
                .process(bucket, key)
                .await
                .map_err(|err| abort(err, targets.len() - position - 1))?;
            summary.record(&outcome);
        }

        info!(evaluated = summary.evaluated, skipped = summary.skipped, "Complete!");
        Ok(summary)
    }

    /// Processes every listed object of the configured bucket, stopping at the first failure.
    pub async fn run_bucket(&self) -> Result<Summary> {
        let bucket = &self.settings.bucket_name;
        let keys = if self.settings.list_all_pages {
            self.store.list_all_keys(bucket).await?
        } else {
            self.store.list_keys(bucket).await?
        };
        info!(bucket = %bucket, objects = keys.len(), "Objects found");

        let mut summary = Summary::default();
        for (position, key) in keys.iter().enumerate() {
            let outcome = self
                .process(bucket, key)
                .await
                .map_err(|err| abort(err, keys.len() - position - 1))?;
            summary.record(&outcome);
        }

        info!(evaluated = summary.evaluated, skipped = summary.skipped, "Complete!");
        Ok(summary)
    }
}

fn abort(err: Error, remaining: usize) -> Error {
    error!(
        model_failure = err.is_model_failure(),
        remaining,
        error = %err,
        "Aborting run"
    );
    err
}
