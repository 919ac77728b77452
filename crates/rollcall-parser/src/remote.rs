//! Completion-service backed attendance parser

use crate::config::{ParserConfig, API_KEY_ENV};
use crate::error::ParserError;
use crate::fallback::FallbackParser;
use crate::prompt::PromptBuilder;
use crate::response::decode_response;
use async_trait::async_trait;
use rollcall_domain::traits::{CommandParser, CompletionProvider};
use rollcall_domain::{Clock, ParsedAttendanceCommand, SystemClock};
use rollcall_llm::GroqProvider;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Parses commands with a completion service, falling back to the
/// rule-based parser on any failure
///
/// Without a provider every command goes straight to the fallback.
pub struct AttendanceParser<P>
where
    P: CompletionProvider,
{
    provider: Option<Arc<P>>,
    fallback: FallbackParser,
    clock: Arc<dyn Clock>,
    config: ParserConfig,
}

impl<P> AttendanceParser<P>
where
    P: CompletionProvider + 'static,
{
    /// Create a parser that consults `provider` first
    pub fn new(provider: P, config: ParserConfig) -> Self {
        Self {
            provider: Some(Arc::new(provider)),
            fallback: FallbackParser::new(),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Create a parser that only uses the rule-based parser
    pub fn fallback_only(config: ParserConfig) -> Self {
        Self {
            provider: None,
            fallback: FallbackParser::new(),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the clock used for default dates on both paths
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.fallback = FallbackParser::with_clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }

    /// Whether a completion provider is configured
    pub fn is_remote(&self) -> bool {
        self.provider.is_some()
    }

    /// Parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a command; never fails
    pub async fn parse(&self, command: &str) -> ParsedAttendanceCommand {
        match self.parse_remote(command).await {
            Ok(parsed) => parsed,
            Err(ParserError::NoProvider) => self.fallback.parse(command),
            Err(e) => {
                warn!(error = %e, "Remote parse failed, using rule-based parser");
                self.fallback.parse(command)
            }
        }
    }

    /// Parse a command with the completion service only
    pub async fn parse_remote(&self, command: &str) -> Result<ParsedAttendanceCommand, ParserError> {
        let provider = self.provider.as_ref().ok_or(ParserError::NoProvider)?;

        if command.trim().is_empty() {
            return Err(ParserError::EmptyCommand);
        }
        let length = command.chars().count();
        if length > self.config.max_command_length {
            return Err(ParserError::CommandTooLong(length, self.config.max_command_length));
        }

        let now = self.clock.now();
        let request = PromptBuilder::new(command).with_today(now.date()).build();

        debug!(
            model = provider.model_name(),
            prompt_chars = request.system.len() + request.user.len(),
            "Requesting completion"
        );

        let deadline = self.config.request_timeout();
        let response = timeout(deadline, provider.complete(&request))
            .await
            .map_err(|_| ParserError::Timeout(deadline))?
            .map_err(|e| ParserError::Llm(e.to_string()))?;

        debug!(response_chars = response.len(), "Completion received");

        decode_response(&response, now)
    }
}

impl AttendanceParser<GroqProvider> {
    /// Build a parser from the process environment
    ///
    /// Reads `GROQ_API_KEY` once. A missing or blank key yields a
    /// fallback-only parser rather than an error.
    pub fn from_env(config: ParserConfig) -> Self {
        Self::from_api_key(std::env::var(API_KEY_ENV).ok(), config)
    }

    /// Build a parser from an optional credential
    pub fn from_api_key(api_key: Option<String>, config: ParserConfig) -> Self {
        let api_key = match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => key,
            None => {
                warn!(
                    "{} is not set; natural-language parsing will use the rule-based parser only",
                    API_KEY_ENV
                );
                return Self::fallback_only(config);
            }
        };

        let provider = GroqProvider::new(api_key, config.model.clone())
            .and_then(|p| p.with_endpoint(config.endpoint.clone()).with_timeout(config.request_timeout()));

        match provider {
            Ok(provider) => {
                info!(model = %config.model, endpoint = %config.endpoint, "Completion service configured");
                Self::new(provider, config)
            }
            Err(e) => {
                warn!(error = %e, "Completion service unavailable; using rule-based parser only");
                Self::fallback_only(config)
            }
        }
    }
}

#[async_trait]
impl<P> CommandParser for AttendanceParser<P>
where
    P: CompletionProvider + 'static,
{
    async fn parse(&self, command: &str) -> ParsedAttendanceCommand {
        AttendanceParser::parse(self, command).await
    }

    fn is_remote(&self) -> bool {
        AttendanceParser::is_remote(self)
    }
}
