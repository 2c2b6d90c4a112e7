//! AWS Bedrock quote source
//!
//! The generative variant of the quote supply: one Converse API call per
//! fetch, carrying a prompt built from the domain templates. The call is
//! stateless — a quote fetch is one prompt, one response, no conversation
//! history. Returns the model's raw text; tolerant extraction happens in the
//! domain parser.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types as bedrock;
use botlines_application::ports::quote_source::{QuoteSource, SourceError};
use botlines_domain::{Personalization, QuotePromptTemplate};
use tracing::{debug, info, warn};

/// AWS Bedrock source configuration.
///
/// Credentials come from the AWS environment (profile, env vars, instance
/// role) — outside this crate's concern.
#[derive(Debug, Clone)]
pub struct BedrockSourceConfig {
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// AWS profile name for credentials
    pub profile: Option<String>,
    /// Bedrock model identifier
    pub model_id: String,
    /// Max tokens per response (default: 1024)
    pub max_tokens: i32,
}

impl Default for BedrockSourceConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
            model_id: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            max_tokens: 1024,
        }
    }
}

/// Generative quote source backed by the Bedrock Converse API
pub struct BedrockQuoteSource {
    client: BedrockClient,
    model_id: String,
    max_tokens: i32,
}

impl BedrockQuoteSource {
    /// Create a new Bedrock quote source.
    ///
    /// Initializes AWS credentials and creates a Bedrock Runtime client.
    pub async fn new(config: &BedrockSourceConfig) -> Result<Self, SourceError> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref profile) = config.profile {
            loader = loader.profile_name(profile);
        }

        let aws_config = loader.load().await;
        Ok(Self {
            client: BedrockClient::new(&aws_config),
            model_id: config.model_id.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Try to create a Bedrock quote source.
    ///
    /// Returns `None` if AWS initialization fails. Used during DI assembly to
    /// fall back to the built-in table.
    pub async fn try_new(config: &BedrockSourceConfig) -> Option<Self> {
        match Self::new(config).await {
            Ok(source) => {
                info!(region = %config.region, model = %config.model_id, "Bedrock quote source initialized");
                Some(source)
            }
            Err(e) => {
                warn!("Bedrock quote source not available: {}", e);
                None
            }
        }
    }

    /// One-shot generation call: system prompt + user prompt, raw text back.
    async fn generate(&self, prompt: String) -> Result<String, SourceError> {
        let message = bedrock::Message::builder()
            .role(bedrock::ConversationRole::User)
            .content(bedrock::ContentBlock::Text(prompt))
            .build()
            .map_err(|e| SourceError::Other(format!("Failed to build message: {}", e)))?;

        debug!(model = %self.model_id, "Calling Bedrock Converse API");

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_system(Some(vec![bedrock::SystemContentBlock::Text(
                QuotePromptTemplate::system().to_string(),
            )]))
            .messages(message)
            .inference_config(
                bedrock::InferenceConfiguration::builder()
                    .max_tokens(self.max_tokens)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| convert_converse_error(&e))?;

        let output = response.output().ok_or_else(|| {
            SourceError::MalformedEnvelope("No output in Bedrock response".to_string())
        })?;

        let text = match output {
            bedrock::ConverseOutput::Message(message) => message
                .content()
                .iter()
                .filter_map(|block| match block {
                    bedrock::ContentBlock::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(""),
            _ => String::new(),
        };

        if text.is_empty() {
            return Err(SourceError::MalformedEnvelope(
                "No text content in Bedrock response".to_string(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl QuoteSource for BedrockQuoteSource {
    fn name(&self) -> &str {
        "bedrock"
    }

    async fn fetch_batch(
        &self,
        personalization: &Personalization,
        count: usize,
    ) -> Result<String, SourceError> {
        self.generate(QuotePromptTemplate::batch_request(personalization, count))
            .await
    }

    async fn fetch_one(&self, personalization: &Personalization) -> Result<String, SourceError> {
        self.generate(QuotePromptTemplate::single_request(personalization))
            .await
    }
}

/// Map Bedrock SDK errors onto the source error taxonomy.
fn convert_converse_error(
    err: &aws_sdk_bedrockruntime::error::SdkError<
        aws_sdk_bedrockruntime::operation::converse::ConverseError,
    >,
) -> SourceError {
    use aws_sdk_bedrockruntime::operation::converse::ConverseError;

    match err {
        aws_sdk_bedrockruntime::error::SdkError::ServiceError(service_err) => {
            match service_err.err() {
                ConverseError::AccessDeniedException(e) => {
                    SourceError::Auth(format!("Bedrock access denied: {}", e))
                }
                ConverseError::ThrottlingException(e) => {
                    SourceError::Auth(format!("Bedrock throttled: {}", e))
                }
                ConverseError::ModelTimeoutException(_) => SourceError::Timeout,
                ConverseError::ValidationException(e) => {
                    SourceError::Other(format!("Bedrock validation error: {}", e))
                }
                other => SourceError::Other(format!("Bedrock error: {:?}", other)),
            }
        }
        other => SourceError::Connection(format!("Bedrock SDK error: {}", other)),
    }
}
