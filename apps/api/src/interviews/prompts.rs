// Prompt constants for interview question generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ARRAY_ONLY_INSTRUCTION, VOICE_SAFE_INSTRUCTION};

/// Question generation prompt template.
/// Replace: {role}, {level}, {techstack}, {type}, {amount}, {json_only}, {voice_safe}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Prepare questions for a job interview.
The job role is {role}.
The job experience level is {level}.
The tech stack used in the job is: {techstack}.
The focus between behavioural and technical questions should lean towards: {type}.
The amount of questions required is: {amount}.
{json_only}
{voice_safe}
Return the questions formatted like this:
["Question 1", "Question 2", "Question 3"]

Thank you! <3"#;

pub fn build_questions_prompt(
    role: &str,
    level: &str,
    techstack: &str,
    interview_type: &str,
    amount: &str,
) -> String {
    QUESTIONS_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{level}", level)
        .replace("{techstack}", techstack)
        .replace("{type}", interview_type)
        .replace("{amount}", amount)
        .replace("{json_only}", JSON_ARRAY_ONLY_INSTRUCTION)
        .replace("{voice_safe}", VOICE_SAFE_INSTRUCTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_every_field() {
        let prompt = build_questions_prompt("Backend", "Senior", "Rust, Go", "Technical", "7");
        assert!(prompt.contains("The job role is Backend."));
        assert!(prompt.contains("The job experience level is Senior."));
        assert!(prompt.contains("The tech stack used in the job is: Rust, Go."));
        assert!(prompt.contains("should lean towards: Technical."));
        assert!(prompt.contains("The amount of questions required is: 7."));
        assert!(prompt.contains(VOICE_SAFE_INSTRUCTION));
        assert!(prompt.contains(JSON_ARRAY_ONLY_INSTRUCTION));
        assert!(!prompt.contains("{json_only}"));
        assert!(!prompt.contains("{voice_safe}"));
    }
}
