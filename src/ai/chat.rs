//! OpenAI-compatible chat-completions adapter

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AiSettings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::AiSuggestion;

use super::SuggestionAdapter;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuggestionPayload {
    List(Vec<AiSuggestion>),
    Wrapped { entries: Vec<AiSuggestion> },
}

/// Adapter backed by a `/chat/completions` endpoint
#[derive(Debug, Clone)]
pub struct ChatCompletionsAdapter {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatCompletionsAdapter {
    pub fn new(settings: &AiSettings, api_key: impl Into<String>) -> LedgerResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
            api_key: api_key.into(),
        })
    }

    /// Build from settings, reading the key from the configured variable
    pub fn from_settings(settings: &AiSettings) -> LedgerResult<Self> {
        Self::new(settings, settings.api_key()?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SuggestionAdapter for ChatCompletionsAdapter {
    async fn suggest(&self, input: &str, categories: &[String]) -> LedgerResult<Vec<AiSuggestion>> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(system_prompt(categories)),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(input.to_string()),
                },
            ],
            temperature: 0.1,
            response_format: ResponseFormat { kind: "json_object" },
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "requesting suggestions");

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let response: ChatResponse = resp.json().await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LedgerError::Adapter("Response contained no message".into()))?;

        parse_suggestions(&content)
    }
}

/// Instructions sent ahead of the user's text
pub fn system_prompt(categories: &[String]) -> String {
    let today = Local::now().date_naive();
    let known = if categories.is_empty() {
        "（暂无）".to_string()
    } else {
        categories.join("、")
    };

    format!(
        "你是一个记账助手。把用户的描述拆分成一条或多条账目，只输出 JSON 对象 \
         {{\"entries\": [...]}}，每条账目包含字段：year、month、day（整数）、\
         summary（摘要）、category（类别）、income、expense（数字，未发生的一项为 0）。\
         今天是 {}，相对日期按今天换算。\
         已有类别：{}。能归入已有类别时请沿用原名称。",
        today.format("%Y-%m-%d"),
        known
    )
}

/// Parse the model's reply into candidates
///
/// Accepts a bare array or an object with an `entries` array, optionally
/// wrapped in a fenced code block.
pub fn parse_suggestions(content: &str) -> LedgerResult<Vec<AiSuggestion>> {
    let payload: SuggestionPayload = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| {
            warn!(error = %e, "unparsable suggestion response");
            LedgerError::Adapter(format!("Could not parse suggestions: {}", e))
        })?;

    Ok(match payload {
        SuggestionPayload::List(entries) => entries,
        SuggestionPayload::Wrapped { entries } => entries,
    })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (`json`) on the opening line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let content = r#"[{"year":2025,"month":1,"day":9,"summary":"请客户吃饭","category":"商务招待","income":0,"expense":1200}]"#;
        let suggestions = parse_suggestions(content).unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].summary, "请客户吃饭");
        assert_eq!(suggestions[0].expense.cents(), 120_000);
    }

    #[test]
    fn test_parse_wrapped_object_in_fence() {
        let content = "```json\n{\"entries\": [\n  {\"year\":2025,\"month\":2,\"day\":1,\"summary\":\"房租\",\"income\":0,\"expense\":3500.5},\n  {\"year\":2025,\"month\":2,\"day\":2,\"summary\":\"回款\",\"income\":800}\n]}\n```";
        let suggestions = parse_suggestions(content).unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].expense.cents(), 350_050);
        assert_eq!(suggestions[0].category, "");
        assert!(suggestions[1].expense.is_zero());
        assert_eq!(suggestions[1].income.cents(), 80_000);
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_suggestions("抱歉，我无法理解").unwrap_err();
        assert!(matches!(err, LedgerError::Adapter(_)));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("  [1] "), "[1]");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```json\n{}\n```\n"), "{}");
    }

    #[test]
    fn test_system_prompt_lists_categories() {
        let prompt = system_prompt(&["人力成本".to_string(), "经营收入".to_string()]);
        assert!(prompt.contains("人力成本、经营收入"));

        assert!(system_prompt(&[]).contains("（暂无）"));
    }

    #[test]
    fn test_endpoint_from_settings() {
        let settings = AiSettings {
            base_url: "https://api.example.com/v1/".to_string(),
            ..AiSettings::default()
        };
        let adapter = ChatCompletionsAdapter::new(&settings, "key").unwrap();
        assert_eq!(adapter.endpoint(), "https://api.example.com/v1/chat/completions");
    }
}
