//! DanceSport Coach Agent
//!
//! Wraps a text-generation provider with the coach prompts and the dance
//! knowledge table. Every public operation returns displayable text:
//! provider failures come back as `"Error generating response: ..."` and
//! missing data as a fixed placeholder, never as an `Err`.

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, warn};

use super::knowledge::{self, DanceInfo};
use super::prompt::PromptTemplates;
use super::provider::{SharedProvider, with_context};
use crate::config::SkillLevel;
use crate::constants::messages::{GENERATION_ERROR_PREFIX, NO_DANCE_DATA, UNKNOWN_COMPARISON};
use crate::workspace::WorkspaceObject;

/// Speaker of a conversation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the append-only conversation log
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// AI coach for DanceSport students
pub struct CoachAgent {
    provider: SharedProvider,
    history: Vec<ChatMessage>,
}

impl std::fmt::Debug for CoachAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachAgent")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .field("history", &self.history.len())
            .finish()
    }
}

impl CoachAgent {
    pub fn new(provider: SharedProvider) -> Self {
        Self {
            provider,
            history: Vec::new(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Conversation log, oldest first
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, role: ChatRole, content: &str) {
        self.history.push(ChatMessage {
            role,
            content: content.to_string(),
            timestamp: Local::now(),
        });
    }

    /// One completion call; failures become `"Error generating response: {reason}"`
    pub async fn generate_response(&mut self, prompt: &str, context: Option<&str>) -> String {
        let full_prompt = with_context(prompt, context);
        debug!(
            "Coach request via {} ({} chars)",
            self.provider.name(),
            full_prompt.len()
        );

        let text = match self.provider.generate(&full_prompt).await {
            Ok(response) => {
                debug!(
                    "Coach response from {}/{}: {} tokens in {}ms",
                    response.metadata.provider,
                    response.metadata.model,
                    response.usage.total(),
                    response.timing.total_ms
                );
                response.text
            }
            Err(e) => {
                warn!("Text generation failed: {}", e);
                format!("{}: {}", GENERATION_ERROR_PREFIX, e)
            }
        };

        self.record(ChatRole::User, prompt);
        self.record(ChatRole::Assistant, &text);
        text
    }

    /// Coach analysis over the records of one dance store
    pub async fn analyze_progress(&mut self, records: &[WorkspaceObject]) -> String {
        if records.is_empty() {
            return NO_DANCE_DATA.to_string();
        }

        let context = progress_context(records);
        self.generate_response(&PromptTemplates::progress_analysis(), Some(&context))
            .await
    }

    /// 30-minute routine for a dance from the knowledge table
    pub async fn suggest_practice_routine(
        &mut self,
        dance: &str,
        skill_level: SkillLevel,
        focus_areas: &[String],
    ) -> String {
        let Some(info) = knowledge::lookup(dance) else {
            return format!(
                "I don't have specific information about {} in my knowledge base.",
                dance
            );
        };

        let context = routine_context(dance, skill_level, info, focus_areas);
        self.generate_response(&PromptTemplates::practice_routine(), Some(&context))
            .await
    }

    /// Short supportive comment on one practice observation
    pub async fn create_practice_comment(&mut self, dance: &str, observation: &str) -> String {
        let prompt = PromptTemplates::practice_comment(dance, observation);
        self.generate_response(&prompt, None).await
    }

    /// Free-form question answered against the knowledge table
    pub async fn answer_question(&mut self, question: &str, dance_context: Option<&str>) -> String {
        let mut context = knowledge::knowledge_base_context();
        if let Some(extra) = dance_context.filter(|c| !c.trim().is_empty()) {
            context.push_str(&format!("\n\nAdditional Context:\n{}", extra));
        }

        self.generate_response(&PromptTemplates::question(question), Some(&context))
            .await
    }

    /// Side-by-side comparison of two dances named exactly as in the table
    pub async fn compare_dances(&mut self, first: &str, second: &str) -> String {
        let (Some(a), Some(b)) = (knowledge::get(first), knowledge::get(second)) else {
            return UNKNOWN_COMPARISON.to_string();
        };

        let context = format!(
            "Dance 1: {}\n{}\n\nDance 2: {}\n{}",
            first,
            render_info(a),
            second,
            render_info(b)
        );
        self.generate_response(&PromptTemplates::comparison(), Some(&context))
            .await
    }
}

fn render_info(info: &DanceInfo) -> String {
    serde_json::to_string_pretty(info).unwrap_or_else(|_| info.display_name())
}

fn progress_context(records: &[WorkspaceObject]) -> String {
    let mut context = String::from("Dance Progress Data:\n\n");
    for record in records {
        context.push_str(&format!("- {}\n", record.title));
        if let Some(properties) = record.properties().filter(|p| !p.is_empty())
            && let Ok(json) = serde_json::to_string_pretty(properties)
        {
            context.push_str(&format!("  Properties: {}\n", json));
        }
    }
    context
}

fn routine_context(
    dance: &str,
    skill_level: SkillLevel,
    info: &DanceInfo,
    focus_areas: &[String],
) -> String {
    let mut context = format!(
        "Dance: {}\nSkill Level: {}\nRhythm: {}\nCharacteristics: {}\nKey Elements: {}\nFundamental Figures: {}\n",
        dance,
        skill_level,
        info.rhythm,
        info.characteristics,
        info.key_elements.join(", "),
        info.fundamental_figures.join(", ")
    );
    if !focus_areas.is_empty() {
        context.push_str(&format!("\nFocus Areas: {}", focus_areas.join(", ")));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{LlmProvider, LlmResponse};
    use crate::types::{ApiError, ErrorCategory, Result};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct MockProvider {
        fail: bool,
        prompts: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(ApiError::new("gemini", ErrorCategory::Unavailable, "model overloaded")
                    .with_status(503)
                    .into());
            }
            Ok(LlmResponse::text_only("Keep practicing!"))
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    fn agent(fail: bool) -> (CoachAgent, Arc<MockProvider>) {
        let provider = MockProvider::new(fail);
        (CoachAgent::new(provider.clone()), provider)
    }

    fn record(title: &str) -> WorkspaceObject {
        WorkspaceObject::from_value(json!({
            "object": "page",
            "id": "p1",
            "properties": {
                "Name": {"type": "title", "title": [{"plain_text": title}]},
                "Status": {"type": "select", "select": {"name": "Learning"}}
            }
        }))
    }

    #[tokio::test]
    async fn test_generation_failure_becomes_text() {
        let (mut coach, _) = agent(true);
        let text = coach.generate_response("Hello", None).await;
        assert!(text.starts_with("Error generating response:"));
        assert!(text.contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_context_block_is_prefixed() {
        let (mut coach, provider) = agent(false);
        coach.generate_response("Task text", Some("Some context")).await;
        assert_eq!(
            provider.prompts(),
            vec!["Context:\nSome context\n\nTask:\nTask text".to_string()]
        );
    }

    #[tokio::test]
    async fn test_history_records_both_sides() {
        let (mut coach, _) = agent(false);
        coach.generate_response("What is a New York?", None).await;

        let history = coach.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[0].content, "What is a New York?");
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[1].content, "Keep practicing!");
        assert!(history[0].timestamp <= history[1].timestamp);

        coach.clear_history();
        assert!(coach.history().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_without_records_skips_model() {
        let (mut coach, provider) = agent(false);
        assert_eq!(
            coach.analyze_progress(&[]).await,
            "No dance data available for analysis."
        );
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_context_lists_records() {
        let (mut coach, provider) = agent(false);
        coach.analyze_progress(&[record("Spot Turn")]).await;

        let prompt = &provider.prompts()[0];
        assert!(prompt.starts_with("Context:\nDance Progress Data:\n\n- Spot Turn\n  Properties: {"));
        assert!(prompt.contains("\"Learning\""));
        assert!(prompt.contains("1. **Overall Progress Assessment**"));
    }

    #[tokio::test]
    async fn test_routine_for_unknown_dance() {
        let (mut coach, provider) = agent(false);
        let text = coach
            .suggest_practice_routine("Tango", SkillLevel::Beginner, &[])
            .await;
        assert_eq!(
            text,
            "I don't have specific information about Tango in my knowledge base."
        );
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_routine_context() {
        let (mut coach, provider) = agent(false);
        let focus = vec!["Timing".to_string(), "Frame".to_string()];
        coach
            .suggest_practice_routine("Cha Cha Cha Lesson 1", SkillLevel::Intermediate, &focus)
            .await;

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("Dance: Cha Cha Cha Lesson 1\nSkill Level: intermediate\n"));
        assert!(prompt.contains("Rhythm: 4/4 time, 30-32 bars per minute\n"));
        assert!(prompt.contains("Key Elements: Cuban motion, Compact steps, Sharp timing\n"));
        assert!(prompt.contains("\nFocus Areas: Timing, Frame"));
    }

    #[tokio::test]
    async fn test_answer_question_additional_context() {
        let (mut coach, provider) = agent(false);
        coach
            .answer_question("How fast is rumba?", Some("Current focus: Rumba"))
            .await;

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("DanceSport Knowledge Base:"));
        assert!(prompt.contains("\n\nAdditional Context:\nCurrent focus: Rumba"));
        assert!(prompt.contains("Question: How fast is rumba?"));
    }

    #[tokio::test]
    async fn test_compare_unknown_dance() {
        let (mut coach, provider) = agent(false);
        assert_eq!(
            coach.compare_dances("rumba", "tango").await,
            "I don't have information about one or both of these dances."
        );
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_compare_known_dances() {
        let (mut coach, provider) = agent(false);
        let text = coach.compare_dances("Rumba", "bolero").await;
        assert_eq!(text, "Keep practicing!");

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("Dance 1: Rumba\n{"));
        assert!(prompt.contains("Dance 2: bolero\n{"));
        assert!(prompt.contains("\"rhythm\": \"4/4 time, 24-26 bars per minute\""));
    }

    #[tokio::test]
    async fn test_comment_prompt_has_no_context() {
        let (mut coach, provider) = agent(false);
        coach
            .create_practice_comment("Mambo", "Breaks were late")
            .await;
        assert!(provider.prompts()[0].starts_with("As a DanceSport coach"));
    }
}
