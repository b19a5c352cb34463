use crate::error::{Error, Result};
use crate::model::{user_content, TextModel, MAX_TOKENS, TEMPERATURE, TOP_P};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ConverseOutput as ConverseOutputType, InferenceConfiguration,
    Message,
};
use aws_sdk_bedrockruntime::Client;
use tracing::error;

/// Converse API client for a single model id.
#[derive(Debug, Clone)]
pub struct BedrockModel {
    client: Client,
    model_id: String,
}

impl BedrockModel {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    async fn converse(&self, prompt: &str, text: &str) -> Result<String> {
        let message = user_message(prompt, text).map_err(|e| self.invocation_error(e))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .messages(message)
            .inference_config(inference_config())
            .send()
            .await
            .map_err(|e| self.invocation_error(DisplayErrorContext(&e)))?;

        first_text(response.output())
            .map(str::to_owned)
            .ok_or_else(|| Error::EmptyResponse {
                model_id: self.model_id.clone(),
            })
    }

    fn invocation_error(&self, err: impl std::fmt::Display) -> Error {
        Error::ModelInvocation {
            model_id: self.model_id.clone(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl TextModel for BedrockModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, prompt: &str, text: &str) -> Result<String> {
        let result = self.converse(prompt, text).await;

        if let Err(err) = &result {
            error!(model_id = %self.model_id, error = %err, "Can't invoke model");
        }

        result
    }
}

fn user_message(
    prompt: &str,
    text: &str,
) -> std::result::Result<Message, aws_sdk_bedrockruntime::error::BuildError> {
    Message::builder()
        .role(ConversationRole::User)
        .content(ContentBlock::Text(user_content(prompt, text)))
        .build()
}

fn inference_config() -> InferenceConfiguration {
    InferenceConfiguration::builder()
        .max_tokens(MAX_TOKENS)
        .temperature(TEMPERATURE)
        .top_p(TOP_P)
        .build()
}

/// Text of the first content block of the output message, if that block is text.
fn first_text(output: Option<&ConverseOutputType>) -> Option<&str> {
    output?
        .as_message()
        .ok()?
        .content()
        .first()?
        .as_text()
        .ok()
        .map(String::as_str)
}
