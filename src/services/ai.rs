// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AI-generated birthday messages and gift suggestions.
//!
//! Best effort only: network errors, auth failures, and unparseable replies
//! all collapse to `None` so the reminder email still goes out with its
//! non-AI content.

use serde::{Deserialize, Serialize};

/// Maximum number of gift ideas kept from a reply.
const MAX_GIFTS: usize = 5;

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Parsed AI reply: a congratulations message and up to five gift ideas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSuggestions {
    pub message: String,
    pub gifts: Vec<String>,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_completion_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

impl AiClient {
    pub fn new() -> Self {
        Self::with_base_url("https://api.openai.com/v1")
    }

    /// Point the client at a different endpoint (tests, local gateways).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Request a congratulations message and gift ideas for one birthday.
    /// Any failure is logged once and reported as `None`.
    pub async fn suggest(
        &self,
        name: &str,
        age: Option<i32>,
        note: Option<&str>,
        api_key: &str,
    ) -> Option<AiSuggestions> {
        match self.request_suggestions(name, age, note, api_key).await {
            Ok(Some(suggestions)) => Some(suggestions),
            Ok(None) => {
                tracing::error!(name, "AI reply had no usable MESSAGE/GIFTS sections");
                None
            }
            Err(err) => {
                tracing::error!(error = %err, name, "Failed to generate AI suggestions");
                None
            }
        }
    }

    async fn request_suggestions(
        &self,
        name: &str,
        age: Option<i32>,
        note: Option<&str>,
        api_key: &str,
    ) -> anyhow::Result<Option<AiSuggestions>> {
        let mut context_parts = vec![format!("Person's name: {name}")];
        if let Some(age) = age {
            context_parts.push(format!("Turning {age} years old"));
        }
        if let Some(note) = note {
            context_parts.push(format!("Additional info: {note}"));
        }
        let context = context_parts.join(". ");

        let prompt = format!(
            "Given the following information about someone celebrating a birthday:\n\
             {context}\n\n\
             Please provide:\n\
             1. A warm, personalized birthday congratulations message (1 paragraph, 2-3 sentences)\n\
             2. 5 thoughtful gift suggestions appropriate for their age and context\n\n\
             Format your response exactly as:\n\
             MESSAGE: [your congratulations message here]\n\n\
             GIFTS:\n\
             1. [Gift idea 1]\n\
             2. [Gift idea 2]\n\
             3. [Gift idea 3]\n\
             4. [Gift idea 4]\n\
             5. [Gift idea 5]\n\n\
             Keep the tone warm and friendly. Consider cultural appropriateness and age-appropriateness."
        );

        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are a helpful assistant that creates personalized birthday \
                              messages and gift suggestions."
                        .to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            max_completion_tokens: 500,
            temperature: 0.7,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("AI endpoint returned {}", response.status());
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(parse_suggestions(&content))
    }
}

impl Default for AiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the `MESSAGE:` / `GIFTS:` reply format. Gift lines must start with
/// a number or a dash; the leading marker is stripped and at most five are
/// kept in reply order. Returns `None` when neither section yields content.
fn parse_suggestions(reply: &str) -> Option<AiSuggestions> {
    // The two sections parse independently; a reply with only one of them
    // still yields that one.
    let message = reply
        .split_once("MESSAGE:")
        .map(|(_, rest)| rest)
        .unwrap_or("");
    let message = match message.split_once("GIFTS:") {
        Some((before_gifts, _)) => before_gifts,
        None => message,
    };
    let gifts_text = reply
        .split_once("GIFTS:")
        .map(|(_, rest)| rest)
        .unwrap_or("");

    let message = message.trim().to_string();
    let gifts: Vec<String> = gifts_text
        .lines()
        .filter_map(|line| strip_gift_marker(line.trim()))
        .filter(|gift| !gift.is_empty())
        .take(MAX_GIFTS)
        .map(str::to_string)
        .collect();

    if message.is_empty() && gifts.is_empty() {
        return None;
    }
    Some(AiSuggestions { message, gifts })
}

/// Recognize a gift line ("1. foo" or "- foo") and return it without the
/// leading marker.
fn strip_gift_marker(line: &str) -> Option<&str> {
    let first = line.chars().next()?;
    if first.is_ascii_digit() {
        let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        Some(rest.trim_start())
    } else {
        line.strip_prefix('-').map(str::trim_start)
    }
}
