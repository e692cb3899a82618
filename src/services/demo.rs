//! Demo-mode assistant: canned and templated replies, no network.

use rand::Rng;

use super::assistant::{Assistant, AssistantError, AssistantMode, AssistantReply};
use crate::llm::types::Message;

pub const DEMO_CHAT_REPLIES: [&str; 4] = [
    "🐍 Hello! I'm Viper, your AI Python assistant! I'd love to help with your Python questions, but my API key isn't configured yet. Add DEEPSEEK_API_KEY to the .env file to enable real AI responses!",
    "I'm here to help with Python code analysis, debugging, and best practices! Once the completion API is configured, I can give real answers to your programming questions.",
    "Feel free to ask about Python syntax, or libraries like Django, Flask, pandas, and numpy. I'm excited to help you code better!",
    "I can review your code, suggest improvements, explain concepts, and generate examples. I just need that API key to get started! 🚀",
];

pub struct DemoAssistant;

#[async_trait::async_trait]
impl Assistant for DemoAssistant {
    fn mode(&self) -> AssistantMode {
        AssistantMode::Demo
    }

    async fn chat(&self, _message: &str, _history: &[Message]) -> Result<AssistantReply, AssistantError> {
        let pick = rand::rng().random_range(0..DEMO_CHAT_REPLIES.len());
        Ok(AssistantReply::demo(DEMO_CHAT_REPLIES[pick].to_string()))
    }

    async fn analyze_code(&self, code: &str, language: &str) -> Result<AssistantReply, AssistantError> {
        Ok(AssistantReply::demo(demo_analysis(code, language)))
    }

    async fn generate_code(&self, description: &str, language: &str) -> Result<AssistantReply, AssistantError> {
        Ok(AssistantReply::demo(demo_generated_code(description, language)))
    }
}

#[must_use]
pub fn demo_analysis(code: &str, language: &str) -> String {
    format!(
        "🐍 **Code Analysis (Demo Mode)**

I'd love to analyze your {language} code, but my API key isn't configured yet!

**Your code:**
```{language}
{code}
```

**What I could help with once configured:**
- 🔍 Identify potential bugs and logic errors
- ⚡ Suggest performance improvements
- 🐍 Recommend more idiomatic approaches
- 🔒 Highlight security concerns
- 📚 Explain complex concepts
- 💡 Provide refactoring suggestions

Add DEEPSEEK_API_KEY to the .env file to enable real AI code analysis!"
    )
}

#[must_use]
pub fn demo_generated_code(description: &str, language: &str) -> String {
    let title = capitalize(language);
    format!(
        "# 🐍 Generated {title} Code (Demo Mode)
# Request: {description}

def demo_function():
    \"\"\"
    This is a demo response! To get real AI-generated code:
    1. Sign up for the DeepSeek API
    2. Add your API key to the .env file as DEEPSEEK_API_KEY
    3. Restart the server

    Then I can generate production-ready code for: {description}
    \"\"\"
    print(\"Hello from Viper! Configure my API key to generate real code! 🚀\")
    return \"Demo mode active\"

if __name__ == \"__main__\":
    demo_function()"
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "demo_test.rs"]
mod tests;
