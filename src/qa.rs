use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

const GENERATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Question-answering collaborator: prompt in, free text out. Injectable so
/// handlers can be tested with deterministic stand-ins.
#[async_trait]
pub trait QaBridge: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Gemini `generateContent` REST client.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .build()
            .context("building gemini http client")?;
        Ok(Self {
            http,
            api_key,
            model: model.into(),
        })
    }
}

#[async_trait]
impl QaBridge for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let endpoint = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response: Value = self
            .http
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("gemini request failed")?
            .error_for_status()
            .context("gemini returned an error status")?
            .json()
            .await
            .context("decoding gemini response")?;

        response
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("gemini response carried no text"))
    }
}

pub fn question_prompt(content: &str, question: &str) -> String {
    format!(
        "Based on the following content:\n{content}\n\nPlease answer: {question}\n"
    )
}

pub fn suggestion_prompt(context: &str, suggestions: &[String]) -> String {
    format!(
        "Analyze the following web page content (text only, no CSS or JS):\n\
         {context}\n\n\
         Additionally, the following elements were identified:\n\
         {}\n\n\
         You may save this content if you wish. Suggest 3-4 interesting questions \
         the user could ask about this content. Be concise and direct.\n",
        suggestions.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt_embeds_content_and_question() {
        let prompt = question_prompt("page text", "what is it about?");
        assert!(prompt.contains("page text"));
        assert!(prompt.contains("Please answer: what is it about?"));
    }

    #[test]
    fn suggestion_prompt_lists_identified_elements() {
        let prompt = suggestion_prompt(
            "context here",
            &["- 2 links found".into(), "- 1 tables".into()],
        );
        assert!(prompt.contains("context here"));
        assert!(prompt.contains("- 2 links found\n- 1 tables"));
        assert!(prompt.contains("3-4 interesting questions"));
    }
}
