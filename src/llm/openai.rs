use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MODEL;
use crate::error::{Error, Result};
use crate::llm::prompts::{FeedbackRequest, SYSTEM_PROMPT};
use crate::llm::provider::FeedbackProvider;

pub struct OpenAIProvider {
    client: Client,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ApiError,
}

impl OpenAIProvider {
    pub fn with_base_url(api_key: &str, model: Option<String>, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl FeedbackProvider for OpenAIProvider {
    async fn feedback(&self, request: FeedbackRequest) -> Result<String> {
        tracing::debug!("Sending ~{} tokens to {}", request.estimate_tokens(), self.model);

        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.to_prompt(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(Error::LLMApi(format!("OpenAI API error ({}): {}", status, detail)));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to parse OpenAI response: {}", e)))?;

        extract_reply(result)
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}

fn extract_reply(response: ChatResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(Error::LLMApi(error.message));
    }

    let text = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::LLMApi("Empty response from OpenAI".to_string()));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply_takes_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": " Solid fit. "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(response).unwrap(), "Solid fit.");
    }

    #[test]
    fn test_extract_reply_surfaces_api_error() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"error": {"message": "quota exceeded"}}"#).unwrap();
        let err = extract_reply(response).unwrap_err();
        assert!(matches!(err, Error::LLMApi(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn test_extract_reply_rejects_empty() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(extract_reply(response).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider =
            OpenAIProvider::with_base_url("sk-test", None, "http://localhost:8080/v1/").unwrap();
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_recoverable() {
        let provider = OpenAIProvider::with_base_url("sk-test", None, "http://127.0.0.1:9").unwrap();
        let request = FeedbackRequest {
            resume_excerpt: "resume".to_string(),
            job_excerpt: "job".to_string(),
        };
        let err = provider.feedback(request).await.unwrap_err();
        assert!(err.is_recoverable());
    }
}
