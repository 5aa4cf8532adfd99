use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::remote::{decode, endpoint, AuthContext, RemoteError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhanceRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_override: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnhanceResponse {
    enhanced_text: String,
}

/// Rewrites a free-text field. The caller replaces the field with the result.
#[async_trait]
pub trait TextEnhancer: Send + Sync {
    async fn enhance(&self, auth: &AuthContext, request: EnhanceRequest)
        -> Result<String, RemoteError>;
}

#[derive(Clone)]
pub struct HttpTextEnhancer {
    client: Client,
    base_url: String,
}

impl HttpTextEnhancer {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TextEnhancer for HttpTextEnhancer {
    async fn enhance(
        &self,
        auth: &AuthContext,
        request: EnhanceRequest,
    ) -> Result<String, RemoteError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "enhance/"))
            .header("authorization", auth.header_value())
            .json(&request)
            .send()
            .await?;

        let body: EnhanceResponse = decode(response).await?;
        debug!(chars = body.enhanced_text.len(), "enhancement returned");
        Ok(body.enhanced_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn enhancer(server: &MockServer) -> HttpTextEnhancer {
        HttpTextEnhancer::new(Client::new(), server.base_url())
    }

    #[tokio::test]
    async fn test_sends_text_and_override_with_bearer() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/enhance/")
                    .header("authorization", "Bearer tok")
                    .json_body(json!({"text": "did stuff", "prompt_override": "Rewrite: did stuff"}));
                then.status(200)
                    .json_body(json!({"enhanced_text": "Delivered measurable results"}));
            })
            .await;

        let out = enhancer(&server)
            .enhance(
                &AuthContext::bearer("tok"),
                EnhanceRequest {
                    text: "did stuff".to_string(),
                    prompt_override: Some("Rewrite: did stuff".to_string()),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(out, "Delivered measurable results");
    }

    #[tokio::test]
    async fn test_omits_absent_override() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/enhance/")
                    .json_body(json!({"text": "built a thing"}));
                then.status(200).json_body(json!({"enhanced_text": "Built X"}));
            })
            .await;

        let out = enhancer(&server)
            .enhance(
                &AuthContext::bearer("tok"),
                EnhanceRequest {
                    text: "built a thing".to_string(),
                    prompt_override: None,
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(out, "Built X");
    }

    #[tokio::test]
    async fn test_backend_error_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/enhance/");
                then.status(500).json_body(json!({"error": "No API Key"}));
            })
            .await;

        let err = enhancer(&server)
            .enhance(
                &AuthContext::bearer("tok"),
                EnhanceRequest {
                    text: "x".to_string(),
                    prompt_override: None,
                },
            )
            .await
            .unwrap_err();

        match err {
            RemoteError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "No API Key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_token_maps_to_unauthorized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/enhance/");
                then.status(401)
                    .json_body(json!({"detail": "Given token not valid"}));
            })
            .await;

        let err = enhancer(&server)
            .enhance(
                &AuthContext::bearer("stale"),
                EnhanceRequest {
                    text: "x".to_string(),
                    prompt_override: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Unauthorized));
    }
}
