//! Wakanda Chain - character-grounded question answering
//!
//! Answers a question in the voice of a character. The pipeline is short:
//! 1. Trim and validate the character/question pair
//! 2. Build a persona prompt with the lore library as context
//! 3. Ask the configured LLM and wrap its reply as a [`ChainAnswer`]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use wakanda_core::{
    AnswerChain, AppConfig, ChainAnswer, ChainConfig, CharacterQuery, LlmClient, Result,
    WakandaError,
};

pub mod llm;
pub mod lore;
pub mod prompt;

pub use llm::{create_llm_client, OllamaClient, OpenAiClient};
pub use lore::{LoreDocument, LoreLibrary};
pub use prompt::{Prompt, PromptBuilder};

/// Question answering chain over a lore library
pub struct QuestionAnswerDocsChain {
    llm_client: Arc<dyn LlmClient>,
    lore: LoreLibrary,
    max_context_length: usize,
}

impl QuestionAnswerDocsChain {
    pub fn new(llm_client: Arc<dyn LlmClient>, lore: LoreLibrary, config: &ChainConfig) -> Self {
        Self {
            llm_client,
            lore,
            max_context_length: config.max_context_length,
        }
    }

    /// Build the chain from application config: LLM client plus lore directory
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let llm_client: Arc<dyn LlmClient> = Arc::from(create_llm_client(&config.llm)?);
        let lore = match &config.chain.lore_dir {
            Some(dir) => LoreLibrary::load_dir(dir)?,
            None => LoreLibrary::empty(),
        };
        Ok(Self::new(llm_client, lore, &config.chain))
    }

    /// Number of lore documents available as context
    pub fn lore_len(&self) -> usize {
        self.lore.len()
    }

    fn build_prompt(&self, query: &CharacterQuery) -> Prompt {
        PromptBuilder::new()
            .persona(query.character())
            .add_context(self.lore.context(self.max_context_length))
            .question(query.question())
            .add_instruction("Answer as the character, in the first person.")
            .add_instruction("Use the context when it is relevant to the question.")
            .add_instruction("If you do not know the answer, say so in character.")
            .build()
    }

    /// Answer a validated query
    pub async fn answer(&self, query: &CharacterQuery) -> Result<ChainAnswer> {
        let start = Instant::now();
        let prompt = self.build_prompt(query);
        tracing::debug!(
            character = query.character(),
            prompt_chars = prompt.user.len(),
            "Calling LLM"
        );

        let reply = self.llm_client.generate(&prompt.system, &prompt.user).await?;
        let answer = reply.trim();
        if answer.is_empty() {
            return Err(WakandaError::LlmError("LLM returned an empty answer".to_string()));
        }

        tracing::info!(
            character = query.character(),
            answer_chars = answer.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Answer generated"
        );

        Ok(ChainAnswer {
            character: query.character().to_string(),
            answer: answer.to_string(),
        })
    }
}

#[async_trait]
impl AnswerChain for QuestionAnswerDocsChain {
    async fn run(&self, character: &str, question: &str) -> Result<serde_json::Value> {
        // Padding never belongs in the persona or the question
        let query = CharacterQuery::new(character.trim(), question.trim())?;
        let answer = self.answer(&query).await?;
        serde_json::to_value(answer).map_err(|e| WakandaError::Other(anyhow::Error::from(e)))
    }
}

// ============================================================================
// Tests
// ============================================================================
