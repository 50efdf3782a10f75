// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer generation: retrieve, prompt, invoke, clean.

use std::sync::Arc;

use tracing::{debug, info, warn};

use hrdesk_config::HrDeskConfig;
use hrdesk_core::traits::{ProviderAdapter, RetrieverAdapter};
use hrdesk_core::types::ProviderRequest;
use hrdesk_core::HrDeskError;

use crate::prompt::{join_passages, render_prompt};
use crate::sanitize::strip_reasoning;

/// Returned when no retriever could be built at startup.
pub const KNOWLEDGE_BASE_UNAVAILABLE: &str = "System Error: Knowledge base not loaded.";

/// Returned when retrieval finds nothing relevant.
pub const OUT_OF_DOMAIN: &str = "I can only answer questions related to HR policies.";

/// How an answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    /// Model output over retrieved passages.
    Grounded,
    /// Fixed refusal; retrieval found nothing.
    OutOfDomain,
    /// Fixed error string; the retriever is missing.
    KnowledgeBaseUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub kind: AnswerKind,
}

impl Answer {
    fn fixed(text: &str, kind: AnswerKind) -> Self {
        Self {
            text: text.to_string(),
            kind,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.kind == AnswerKind::Grounded
    }
}

/// Produces one answer per query from retrieved HR policy passages.
pub struct ResponseGenerator {
    retriever: Option<Arc<dyn RetrieverAdapter>>,
    provider: Arc<dyn ProviderAdapter>,
    model: String,
    attempts: u32,
}

impl ResponseGenerator {
    pub fn new(
        retriever: Option<Arc<dyn RetrieverAdapter>>,
        provider: Arc<dyn ProviderAdapter>,
        model: impl Into<String>,
        attempts: u32,
    ) -> Self {
        Self {
            retriever,
            provider,
            model: model.into(),
            attempts: attempts.max(1),
        }
    }

    /// Model and retry count from `ollama.llm_model` and `rag.model_attempts`.
    pub fn from_config(
        config: &HrDeskConfig,
        retriever: Option<Arc<dyn RetrieverAdapter>>,
        provider: Arc<dyn ProviderAdapter>,
    ) -> Self {
        Self::new(
            retriever,
            provider,
            config.ollama.llm_model.clone(),
            config.rag.model_attempts,
        )
    }

    pub async fn generate(&self, query: &str) -> Result<Answer, HrDeskError> {
        let Some(retriever) = &self.retriever else {
            warn!("knowledge base not loaded, returning fixed error answer");
            return Ok(Answer::fixed(
                KNOWLEDGE_BASE_UNAVAILABLE,
                AnswerKind::KnowledgeBaseUnavailable,
            ));
        };

        let passages = retriever.retrieve(query).await?;
        if passages.is_empty() {
            info!("no passages retrieved, query treated as out of domain");
            return Ok(Answer::fixed(OUT_OF_DOMAIN, AnswerKind::OutOfDomain));
        }

        let context = join_passages(passages.iter().map(|p| p.text.as_str()));
        let prompt = render_prompt(&context, query);
        debug!(
            passages = passages.len(),
            prompt_len = prompt.len(),
            "prompt rendered"
        );

        let raw = self.invoke(prompt).await?;
        Ok(Answer {
            text: strip_reasoning(&raw),
            kind: AnswerKind::Grounded,
        })
    }

    async fn invoke(&self, prompt: String) -> Result<String, HrDeskError> {
        let mut attempt = 1;
        loop {
            let request = ProviderRequest {
                model: self.model.clone(),
                prompt: prompt.clone(),
            };
            match self.provider.complete(request).await {
                Ok(response) => return Ok(response.content),
                Err(e) if attempt < self.attempts => {
                    warn!(attempt, error = %e, "model invocation failed, retrying");
                    attempt += 1;
                }
                Err(e) => {
                    return Err(match e {
                        provider @ HrDeskError::Provider { .. } => provider,
                        other => HrDeskError::Provider {
                            message: format!("model invocation failed after {attempt} attempts"),
                            source: Some(Box::new(other)),
                        },
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrdesk_test_utils::{MockProvider, MockRetriever};

    fn generator(retriever: Option<MockRetriever>, provider: &MockProvider) -> ResponseGenerator {
        ResponseGenerator::new(
            retriever.map(|r| Arc::new(r) as Arc<dyn RetrieverAdapter>),
            Arc::new(provider.clone()),
            "llama3.2:latest",
            2,
        )
    }

    #[tokio::test]
    async fn missing_retriever_returns_fixed_error() {
        let provider = MockProvider::new();
        let answer = generator(None, &provider).generate("leave?").await.unwrap();
        assert_eq!(answer.text, KNOWLEDGE_BASE_UNAVAILABLE);
        assert_eq!(answer.kind, AnswerKind::KnowledgeBaseUnavailable);
        assert_eq!(provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn zero_passages_refuses_without_model_call() {
        let provider = MockProvider::new();
        let answer = generator(Some(MockRetriever::empty()), &provider)
            .generate("weather?")
            .await
            .unwrap();
        assert_eq!(answer.text, OUT_OF_DOMAIN);
        assert!(!answer.is_grounded());
        assert_eq!(provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn retrieval_error_propagates() {
        let provider = MockProvider::new();
        let err = generator(Some(MockRetriever::failing()), &provider)
            .generate("leave?")
            .await
            .unwrap_err();
        assert!(matches!(err, HrDeskError::Retrieval { .. }));
    }

    #[tokio::test]
    async fn zero_attempts_still_calls_once() {
        let provider = MockProvider::with_responses(["ok"]);
        let generator = ResponseGenerator::new(
            Some(Arc::new(MockRetriever::with_passages(["p"])) as Arc<dyn RetrieverAdapter>),
            Arc::new(provider.clone()),
            "m",
            0,
        );
        assert_eq!(generator.generate("q").await.unwrap().text, "ok");
        assert_eq!(provider.call_count().await, 1);
    }
}
