//! Prompt Builder System
//!
//! Small builder for the coach prompts. Sections are rendered in order and
//! separated by a blank line; numbered items get bold headings.

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Raw text
    Text(String),
    /// Intro line followed by `1. **Heading**: detail` items
    Numbered {
        intro: String,
        items: Vec<(String, String)>,
    },
    /// Intro line followed by `- item` bullets
    Bullets { intro: String, items: Vec<String> },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text(content.to_string()));
        self
    }

    pub fn numbered(mut self, intro: &str, items: &[(&str, &str)]) -> Self {
        self.sections.push(PromptSection::Numbered {
            intro: intro.to_string(),
            items: items
                .iter()
                .map(|(h, d)| (h.to_string(), d.to_string()))
                .collect(),
        });
        self
    }

    pub fn bullets(mut self, intro: &str, items: &[&str]) -> Self {
        self.sections.push(PromptSection::Bullets {
            intro: intro.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let rendered: Vec<String> = self
            .sections
            .into_iter()
            .map(|section| match section {
                PromptSection::Text(content) => content,
                PromptSection::Numbered { intro, items } => {
                    let mut out = intro;
                    for (i, (heading, detail)) in items.iter().enumerate() {
                        out.push_str(&format!("\n{}. **{}**: {}", i + 1, heading, detail));
                    }
                    out
                }
                PromptSection::Bullets { intro, items } => {
                    let mut out = intro;
                    for item in items {
                        out.push_str(&format!("\n- {}", item));
                    }
                    out
                }
            })
            .collect();

        rendered.join("\n\n").trim_end().to_string()
    }
}

/// Coach prompt templates
pub struct PromptTemplates;

impl PromptTemplates {
    pub fn progress_analysis() -> String {
        PromptBuilder::new()
            .text("As a DanceSport coach, analyze this student's progress data.")
            .numbered(
                "Provide a comprehensive analysis including:",
                &[
                    ("Overall Progress Assessment", "Current skill level and trajectory"),
                    ("Strengths", "What the student is doing well"),
                    (
                        "Areas for Improvement",
                        "Specific techniques or figures that need work",
                    ),
                    (
                        "Pattern Recognition",
                        "Any trends in learning or practice habits",
                    ),
                    (
                        "Motivation & Engagement",
                        "Signs of enthusiasm or potential challenges",
                    ),
                ],
            )
            .text("Be encouraging, specific, and actionable in your feedback.")
            .build()
    }

    pub fn practice_routine() -> String {
        PromptBuilder::new()
            .text("Create a detailed 30-minute practice routine for this dance.")
            .numbered(
                "Structure the routine with:",
                &[
                    (
                        "Warm-up (5 minutes)",
                        "Specific movements to prepare the body",
                    ),
                    (
                        "Technique Drills (10 minutes)",
                        "Focused practice on key elements",
                    ),
                    (
                        "Figure Practice (10 minutes)",
                        "Working through fundamental figures",
                    ),
                    (
                        "Cool-down & Review (5 minutes)",
                        "Integration and reflection",
                    ),
                ],
            )
            .bullets(
                "For each section:",
                &[
                    "Provide specific exercises with timing",
                    "Include coaching tips and points of focus",
                    "Add progression notes (how to make it easier/harder)",
                ],
            )
            .text("Make it practical, achievable, and progressive.")
            .build()
    }

    pub fn practice_comment(dance: &str, observation: &str) -> String {
        PromptBuilder::new()
            .text(&format!(
                "As a DanceSport coach, write an encouraging and constructive comment \
                 about a student's practice of {}.",
                dance
            ))
            .text(&format!("Observation: {}", observation))
            .bullets(
                "The comment should:",
                &[
                    "Be supportive and motivating",
                    "Acknowledge progress",
                    "Provide 1-2 specific tips for improvement",
                    "Keep it concise (2-3 sentences)",
                    "Use professional dance terminology where appropriate",
                ],
            )
            .build()
    }

    pub fn question(question: &str) -> String {
        PromptBuilder::new()
            .text(&format!("Question: {}", question))
            .bullets(
                "Provide a clear, informative answer that:",
                &[
                    "Uses proper DanceSport terminology",
                    "Gives practical advice where applicable",
                    "References specific techniques or figures when relevant",
                    "Is encouraging and educational",
                ],
            )
            .build()
    }

    pub fn comparison() -> String {
        PromptBuilder::new()
            .numbered(
                "Compare these two dances in terms of:",
                &[
                    ("Timing & Rhythm", "How they differ musically"),
                    ("Character & Style", "The emotional quality and expression"),
                    ("Technical Elements", "Key movement differences"),
                    ("Difficulty Level", "Which aspects are more challenging"),
                    (
                        "Common Mistakes",
                        "What beginners often struggle with in each",
                    ),
                ],
            )
            .text(
                "Provide a clear, educational comparison that helps a student \
                 understand both dances better.",
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_and_bullets() {
        let prompt = PromptBuilder::new()
            .text("Intro")
            .numbered("Steps:", &[("One", "first"), ("Two", "second")])
            .bullets("Rules:", &["Be brief"])
            .build();

        assert_eq!(
            prompt,
            "Intro\n\nSteps:\n1. **One**: first\n2. **Two**: second\n\nRules:\n- Be brief"
        );
    }

    #[test]
    fn test_routine_template_sections() {
        let prompt = PromptTemplates::practice_routine();
        assert!(prompt.contains("30-minute"));
        assert!(prompt.contains("1. **Warm-up (5 minutes)**"));
        assert!(prompt.contains("4. **Cool-down & Review (5 minutes)**"));
    }

    #[test]
    fn test_comment_template_embeds_inputs() {
        let prompt = PromptTemplates::practice_comment("Rumba", "Late on beat 2");
        assert!(prompt.contains("practice of Rumba."));
        assert!(prompt.contains("Observation: Late on beat 2"));
        assert!(prompt.contains("- Keep it concise (2-3 sentences)"));
    }

    #[test]
    fn test_comparison_has_five_aspects() {
        let prompt = PromptTemplates::comparison();
        assert!(prompt.contains("5. **Common Mistakes**"));
    }
}
