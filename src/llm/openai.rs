use crate::llm::client::{GenerationClient, GenerationSettings};
use crate::types::{AppError, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    settings: GenerationSettings,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, settings: GenerationSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            settings,
        }
    }
}

#[async_trait]
impl GenerationClient for OpenAIClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .temperature(self.settings.temperature)
            .messages(vec![
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                    system.to_string(),
                )),
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                    user.to_string(),
                )),
            ])
            .build()
            .map_err(|e| AppError::Generation(format!("Failed to build request: {}", e)))?;

        // The SDK exposes no per-request deadline, so the bound lives
        // around the whole call.
        let response = tokio::time::timeout(self.settings.timeout, async {
            self.client
                .chat()
                .create(request)
                .await
                .map_err(|e| AppError::Generation(format!("OpenAI API error: {}", e)))
        })
        .await
        .map_err(|_| {
            AppError::Generation(format!(
                "Generation timed out after {}s",
                self.settings.timeout.as_secs()
            ))
        })??;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::Generation("No response from OpenAI".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}
