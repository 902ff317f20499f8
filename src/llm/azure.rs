use async_openai::{
    Client,
    config::AzureConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    },
};

use super::{GenerateRequest, GenerateResponse, Provider};
use crate::config::AzureOpenAIConfig;

pub struct AzureOpenAIProvider {
    client: Client<AzureConfig>,
}

impl AzureOpenAIProvider {
    pub fn new(settings: &AzureOpenAIConfig) -> Self {
        let config = AzureConfig::new()
            .with_api_base(settings.endpoint.trim_end_matches('/'))
            .with_api_version(&settings.api_version)
            .with_deployment_id(&settings.model)
            .with_api_key(&settings.api_key);
        Self {
            client: Client::with_config(config),
        }
    }
}

/// Chat request with a single user message. The token cap goes out as
/// `max_tokens`; Azure API versions before 2024-09-01-preview reject
/// `max_completion_tokens`.
fn build_request(req: &GenerateRequest) -> CreateChatCompletionRequest {
    let messages = vec![ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(req.prompt.clone()),
            name: None,
        },
    )];

    #[allow(deprecated)]
    CreateChatCompletionRequest {
        model: req.model.clone(),
        messages,
        max_tokens: Some(req.max_tokens),
        ..Default::default()
    }
}

#[async_trait::async_trait]
impl Provider for AzureOpenAIProvider {
    async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        let response = self.client.chat().create(build_request(req)).await?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| anyhow::anyhow!("completion returned no choices"))?;

        let content = choice
            .message
            .content
            .clone()
            .ok_or_else(|| anyhow::anyhow!("first completion choice has no text content"))?;

        let finish_reason = choice
            .finish_reason
            .map(|r| format!("{r:?}").to_lowercase())
            .unwrap_or_default();

        let (input_tokens, output_tokens) = match &response.usage {
            Some(usage) => (usage.prompt_tokens, usage.completion_tokens),
            None => (0, 0),
        };

        Ok(GenerateResponse {
            content,
            model: response.model,
            input_tokens,
            output_tokens,
            finish_reason,
        })
    }

    fn name(&self) -> &str {
        "azure.ai.openai"
    }
}
