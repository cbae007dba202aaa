//! Prompt construction

/// System and user halves of an LLM prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Builder for character persona prompts
#[derive(Debug, Default)]
pub struct PromptBuilder {
    system_instruction: String,
    context_sections: Vec<String>,
    question: String,
    instructions: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the system instruction to speak as `character`
    pub fn persona(self, character: &str) -> Self {
        self.system(format!(
            "You are {character}, a character from the world of Wakanda. \
             Answer every question in the first person, as {character} would, \
             staying true to their knowledge, personality and manner of speech."
        ))
    }

    /// Set system instruction
    pub fn system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Add a context section; blank sections are ignored
    pub fn add_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        if !context.trim().is_empty() {
            self.context_sections.push(context);
        }
        self
    }

    /// Set the question
    pub fn question(mut self, q: impl Into<String>) -> Self {
        self.question = q.into();
        self
    }

    /// Add an instruction
    pub fn add_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instructions.push(instruction.into());
        self
    }

    /// Build the final prompt
    pub fn build(self) -> Prompt {
        let mut user = String::new();

        if !self.context_sections.is_empty() {
            user.push_str("<context>\n");
            for section in &self.context_sections {
                user.push_str(section.trim_end());
                user.push_str("\n\n");
            }
            user.push_str("</context>\n\n");
        }

        if !self.question.is_empty() {
            user.push_str("<question>\n");
            user.push_str(&self.question);
            user.push_str("\n</question>\n\n");
        }

        if !self.instructions.is_empty() {
            user.push_str("<instructions>\n");
            for (i, inst) in self.instructions.iter().enumerate() {
                user.push_str(&format!("{}. {}\n", i + 1, inst));
            }
            user.push_str("</instructions>\n");
        }

        Prompt {
            system: self.system_instruction,
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_builder() {
        let prompt = PromptBuilder::new()
            .system("You are a helpful assistant.")
            .add_context("[a.txt]\nContext from document A")
            .add_context("[b.txt]\nContext from document B")
            .question("What is the answer?")
            .add_instruction("Be concise")
            .add_instruction("Stay in character")
            .build();

        assert_eq!(prompt.system, "You are a helpful assistant.");
        assert!(prompt.user.starts_with("<context>\n"));
        assert!(prompt.user.contains("Context from document B"));
        assert!(prompt.user.contains("<question>\nWhat is the answer?\n</question>"));
        assert!(prompt.user.contains("1. Be concise\n2. Stay in character\n"));
    }

    #[test]
    fn test_persona_names_character() {
        let prompt = PromptBuilder::new()
            .persona("Okoye")
            .question("Who do you serve?")
            .build();

        assert!(prompt.system.starts_with("You are Okoye"));
        assert!(!prompt.user.contains("<context>"));
        assert!(!prompt.user.contains("<instructions>"));
    }

    #[test]
    fn test_blank_context_is_skipped() {
        let prompt = PromptBuilder::new().add_context("  \n").question("q").build();
        assert!(!prompt.user.contains("<context>"));
    }
}
