use crate::domain::model::ApiResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// 計費 API 的最小介面：對相對路徑 POST 一個 JSON 物件
#[async_trait]
pub trait BillingApi: Send + Sync {
    async fn post_json(&self, path: &str, payload: &serde_json::Value) -> Result<ApiResponse>;
}
