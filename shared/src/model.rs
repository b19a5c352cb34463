use crate::error::Result;
use async_trait::async_trait;

pub const MAX_TOKENS: i32 = 1024;
pub const TEMPERATURE: f32 = 0.5;
pub const TOP_P: f32 = 0.9;

/// A hosted text-generation model answering one single-turn request at a time.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn model_id(&self) -> &str;

    async fn generate(&self, prompt: &str, text: &str) -> Result<String>;
}

/// Content of the single user turn: the prompt, one space, then the text. Nothing is trimmed.
pub fn user_content(prompt: &str, text: &str) -> String {
    format!("{} {}", prompt, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_space() {
        assert_eq!(user_content("Summarise:", "hello"), "Summarise: hello");
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        assert_eq!(user_content("Rate this \n", " body\n"), "Rate this \n  body\n");
        assert_eq!(user_content("", ""), " ");
    }
}
