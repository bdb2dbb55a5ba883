//! Report requester with primary/fallback model handling.
//!
//! A request resolves the API key, builds the prompt, and asks the primary
//! model for a report. Any failure of that attempt (transport, API status,
//! or a response that does not parse as a report) triggers exactly one retry
//! against the fallback model with the same prompt.

use crate::credentials::{ApiKey, CredentialResolver};
use crate::error::{Result, ScanError};
use crate::prompt::build_report_prompt;
use crate::report::parse_report;
use numscope_core::{IntelReport, LlmConfig, ParsedNumber, ScanConfig};
use numscope_llm::{CompletionRequest, ProviderFactory, ResponseFormat};
use std::sync::Arc;

/// Requests intelligence reports from the configured models.
#[derive(Clone)]
pub struct ReportRequester {
    factory: Arc<dyn ProviderFactory>,
    credentials: CredentialResolver,
    primary_model: String,
    fallback_model: String,
    temperature: f32,
    language: String,
}

impl ReportRequester {
    /// Create a requester from configuration.
    #[must_use]
    pub fn new(
        factory: Arc<dyn ProviderFactory>,
        credentials: CredentialResolver,
        llm: &LlmConfig,
        scan: &ScanConfig,
    ) -> Self {
        Self {
            factory,
            credentials,
            primary_model: llm.primary_model.clone(),
            fallback_model: llm.fallback_model.clone(),
            temperature: llm.temperature,
            language: scan.report_language.clone(),
        }
    }

    /// Request a report for `parsed`.
    ///
    /// `manual_key` takes precedence over every other credential source.
    /// Without any key the call fails with [`ScanError::MissingCredential`]
    /// before a provider is built.
    pub async fn request_report(
        &self,
        parsed: &ParsedNumber,
        manual_key: Option<&str>,
    ) -> Result<IntelReport> {
        let key = self
            .credentials
            .resolve(manual_key)
            .ok_or(ScanError::MissingCredential)?;

        let request = CompletionRequest::new(build_report_prompt(parsed, &self.language))
            .with_temperature(self.temperature)
            .with_response_format(ResponseFormat::Json);

        match self.attempt(&key, &self.primary_model, request.clone()).await {
            Ok(report) => Ok(report),
            Err(err) => {
                tracing::warn!(
                    model = %self.primary_model,
                    fallback = %self.fallback_model,
                    "primary model failed, retrying with fallback: {}",
                    err
                );
                self.attempt(&key, &self.fallback_model, request)
                    .await
                    .inspect_err(|e| {
                        tracing::error!(
                            model = %self.fallback_model,
                            "fallback model failed: {}",
                            e
                        );
                    })
            }
        }
    }

    async fn attempt(
        &self,
        key: &ApiKey,
        model: &str,
        request: CompletionRequest,
    ) -> Result<IntelReport> {
        let provider = self.factory.create(key.expose(), model)?;
        let response = provider.complete(request).await?;

        tracing::debug!(
            model = %response.model,
            chars = response.content.len(),
            "received report response"
        );

        parse_report(&response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use numscope_core::SecurityRisk;
    use numscope_llm::{CompletionResponse, LlmError, LlmProvider};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    const REPORT: &str = r#"{"summary":"x","regionDetails":"y","carrierInfo":"z","securityRisk":"Medium","recommendations":["a"]}"#;

    #[derive(Clone)]
    enum Reply {
        Text(&'static str),
        Fail,
    }

    struct ScriptedProvider {
        model: String,
        reply: Reply,
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> numscope_llm::Result<CompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.response_format, ResponseFormat::Json);
            match &self.reply {
                Reply::Text(text) => Ok(CompletionResponse {
                    content: (*text).to_string(),
                    model: self.model.clone(),
                    stop_reason: Some("STOP".to_string()),
                    usage: None,
                }),
                Reply::Fail => Err(LlmError::ApiError {
                    provider: "scripted".to_string(),
                    status: 503,
                    message: format!("{} unavailable", self.model),
                }),
            }
        }

        fn provider_id(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            &self.model
        }
    }

    struct ScriptedFactory {
        primary: Reply,
        fallback: Reply,
        calls: Arc<AtomicU32>,
        keys_seen: Mutex<Vec<String>>,
    }

    impl ScriptedFactory {
        fn new(primary: Reply, fallback: Reply) -> Arc<Self> {
            Arc::new(Self {
                primary,
                fallback,
                calls: Arc::new(AtomicU32::new(0)),
                keys_seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl ProviderFactory for ScriptedFactory {
        fn create(
            &self,
            api_key: &str,
            model: &str,
        ) -> numscope_llm::Result<Arc<dyn LlmProvider>> {
            self.keys_seen.lock().unwrap().push(api_key.to_string());
            let reply = if model == "primary" {
                self.primary.clone()
            } else {
                self.fallback.clone()
            };
            Ok(Arc::new(ScriptedProvider {
                model: model.to_string(),
                reply,
                calls: self.calls.clone(),
            }))
        }
    }

    fn requester(
        factory: Arc<ScriptedFactory>,
        credentials: CredentialResolver,
    ) -> ReportRequester {
        let llm = LlmConfig {
            primary_model: "primary".to_string(),
            fallback_model: "fallback".to_string(),
            ..LlmConfig::default()
        };
        ReportRequester::new(factory, credentials, &llm, &ScanConfig::default())
    }

    fn parsed() -> ParsedNumber {
        crate::validator::validate("+6281234567890").expect("valid number")
    }

    #[tokio::test]
    async fn test_primary_success_makes_one_call() {
        let factory = ScriptedFactory::new(Reply::Text(REPORT), Reply::Fail);
        let requester = requester(factory.clone(), CredentialResolver::manual_only());

        let report = requester
            .request_report(&parsed(), Some("key"))
            .await
            .expect("report");

        assert_eq!(report.security_risk, SecurityRisk::Medium);
        assert_eq!(factory.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallback_after_primary_failure() {
        let factory = ScriptedFactory::new(Reply::Fail, Reply::Text(REPORT));
        let requester = requester(factory.clone(), CredentialResolver::manual_only());

        let report = requester
            .request_report(&parsed(), Some("key"))
            .await
            .expect("report");

        assert_eq!(report.summary, "x");
        assert_eq!(factory.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fallback_after_malformed_primary() {
        let factory =
            ScriptedFactory::new(Reply::Text("Sorry, I can't help."), Reply::Text(REPORT));
        let requester = requester(factory.clone(), CredentialResolver::manual_only());

        assert!(requester.request_report(&parsed(), Some("key")).await.is_ok());
        assert_eq!(factory.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_both_fail_surfaces_fallback_error() {
        let factory = ScriptedFactory::new(Reply::Text("not json"), Reply::Fail);
        let requester = requester(factory.clone(), CredentialResolver::manual_only());

        let err = requester
            .request_report(&parsed(), Some("key"))
            .await
            .expect_err("both models fail");

        // Primary was malformed, but the fallback's transport error is what surfaces
        assert!(matches!(err, ScanError::Provider(_)));
        assert!(err.to_string().contains("fallback unavailable"));
        assert_eq!(factory.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_calls() {
        let factory = ScriptedFactory::new(Reply::Text(REPORT), Reply::Text(REPORT));
        let requester = requester(factory.clone(), CredentialResolver::manual_only());

        let err = requester
            .request_report(&parsed(), None)
            .await
            .expect_err("no key");

        assert!(matches!(err, ScanError::MissingCredential));
        assert_eq!(factory.calls.load(Ordering::SeqCst), 0);
        assert!(factory.keys_seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolved_key_reaches_factory() {
        let factory = ScriptedFactory::new(Reply::Text(REPORT), Reply::Fail);
        let credentials = CredentialResolver::with_sources(
            |name| (name == "GEMINI_API_KEY").then(|| "env-key".to_string()),
            None,
            None,
        );
        let requester = requester(factory.clone(), credentials);

        requester
            .request_report(&parsed(), None)
            .await
            .expect("report");

        assert_eq!(
            *factory.keys_seen.lock().unwrap(),
            vec!["env-key".to_string()]
        );
    }
}
