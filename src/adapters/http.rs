use crate::domain::model::ApiResponse;
use crate::domain::ports::{BillingApi, ConfigProvider};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// reqwest-backed client for the Paddle billing API.
pub struct PaddleClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PaddleClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BillingApi for PaddleClient {
    async fn post_json(&self, path: &str, payload: &serde_json::Value) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("📡 POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("📥 {} -> {}", url, status);

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    struct MockConfig {
        base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn api_base_url(&self) -> &str {
            &self.base_url
        }

        fn api_key(&self) -> &str {
            "pdl_test_key"
        }

        fn request_timeout(&self) -> Option<Duration> {
            Some(Duration::from_secs(5))
        }
    }

    #[tokio::test]
    async fn test_post_json_sends_auth_and_content_type() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/customers")
                .header("Authorization", "Bearer pdl_test_key")
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"email": "a@b.com"}));
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"data": {"id": "ctm_01"}}));
        });

        let client = PaddleClient::new(&MockConfig {
            base_url: format!("{}/", server.base_url()),
        })
        .unwrap();

        let response = client
            .post_json("/customers", &serde_json::json!({"email": "a@b.com"}))
            .await
            .unwrap();

        api_mock.assert();
        assert!(response.is_created());
        assert!(response.body.contains("ctm_01"));
    }

    #[tokio::test]
    async fn test_post_json_returns_error_status_without_failing() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/customers");
            then.status(409).body("customer_already_exists");
        });

        let client = PaddleClient::new(&MockConfig {
            base_url: server.base_url(),
        })
        .unwrap();

        let response = client
            .post_json("/customers", &serde_json::json!({}))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(response.status, 409);
        assert_eq!(response.body, "customer_already_exists");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PaddleClient::new(&MockConfig {
            base_url: "https://sandbox-api.paddle.com/".to_string(),
        })
        .unwrap();
        assert_eq!(client.base_url(), "https://sandbox-api.paddle.com");
    }
}
