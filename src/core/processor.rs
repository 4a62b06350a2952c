use crate::core::payload;
use crate::domain::model::{ApiResponse, Row, RowResult};
use crate::domain::ports::BillingApi;
use crate::utils::error::{ImportError, Result};

const CUSTOMERS_PATH: &str = "/customers";

/// Replays one CSV row against the billing API.
///
/// The customer call gates everything else: address and business creation
/// need its id. Their failures are recorded as sub-errors and never undo the
/// customer.
pub struct RowProcessor<A: BillingApi> {
    api: A,
}

impl<A: BillingApi> RowProcessor<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Never fails: every error ends up inside the returned `RowResult`.
    pub async fn process(&self, row: &Row) -> RowResult {
        match self.try_process(row).await {
            Ok(result) => result,
            Err(e) => {
                let error = format!("Error processing row {}: {}", row.index, e);
                tracing::warn!("❌ {}", error);
                RowResult::Failure { error }
            }
        }
    }

    async fn try_process(&self, row: &Row) -> Result<RowResult> {
        let customer = payload::customer_payload(row)?;
        let email = customer.email.clone().unwrap_or_default();

        tracing::info!("👤 Processing row {}: {}", row.index, email);
        tracing::debug!("📦 Customer payload: {:?}", customer);

        let response = self
            .api
            .post_json(CUSTOMERS_PATH, &serde_json::to_value(&customer)?)
            .await?;

        if !response.is_created() {
            let error = format!("Failed to create customer {}: {}", email, response.body);
            tracing::warn!("❌ {}", error);
            return Ok(RowResult::Failure { error });
        }

        let customer_id = extract_customer_id(&response)?;
        tracing::info!("✅ Created customer {}", customer_id);

        let mut errors = Vec::new();

        if let Some(address) = payload::address_payload(row, &customer) {
            tracing::debug!("📦 Address payload: {:?}", address);
            let path = format!("{}/{}/addresses", CUSTOMERS_PATH, customer_id);
            if let Some(error) = self.create_child(&path, &address, "address", &email).await {
                errors.push(error);
            } else {
                tracing::info!("🏠 Created address for customer {}", customer_id);
            }
        }

        if let Some(business) = payload::business_payload(row, &customer) {
            tracing::debug!("📦 Business payload: {:?}", business);
            let path = format!("{}/{}/businesses", CUSTOMERS_PATH, customer_id);
            if let Some(error) = self.create_child(&path, &business, "business", &email).await {
                errors.push(error);
            } else {
                tracing::info!("🏢 Created business for customer {}", customer_id);
            }
        }

        if errors.is_empty() {
            Ok(RowResult::Success { customer_id })
        } else {
            Ok(RowResult::PartialSuccess {
                customer_id,
                errors,
            })
        }
    }

    /// POST a dependent entity; returns the sub-error message on failure.
    async fn create_child<T: serde::Serialize>(
        &self,
        path: &str,
        payload: &T,
        entity: &str,
        email: &str,
    ) -> Option<String> {
        let outcome = match serde_json::to_value(payload) {
            Ok(body) => self.api.post_json(path, &body).await,
            Err(e) => Err(e.into()),
        };

        let detail = match outcome {
            Ok(response) if response.is_created() => return None,
            Ok(response) => response.body,
            Err(e) => e.to_string(),
        };

        let error = format!("Failed to create {} for {}: {}", entity, email, detail);
        tracing::warn!("❌ {}", error);
        Some(error)
    }
}

fn extract_customer_id(response: &ApiResponse) -> Result<String> {
    let body: serde_json::Value = serde_json::from_str(&response.body)?;

    body.get("data")
        .and_then(|data| data.get("id"))
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .ok_or_else(|| ImportError::UnexpectedResponse {
            endpoint: CUSTOMERS_PATH.to_string(),
            message: "response body has no data.id".to_string(),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::payload::columns::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Billing API double: answers by the last path segment and records calls.
    #[derive(Clone, Default)]
    pub(crate) struct ScriptedApi {
        responses: HashMap<&'static str, ApiResponse>,
        transport_failures: Vec<&'static str>,
        pub(crate) calls: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
    }

    impl ScriptedApi {
        pub(crate) fn new() -> Self {
            Self::default()
                .respond("customers", 201, r#"{"data":{"id":"ctm_01"}}"#)
                .respond("addresses", 201, r#"{"data":{"id":"add_01"}}"#)
                .respond("businesses", 201, r#"{"data":{"id":"biz_01"}}"#)
        }

        pub(crate) fn respond(mut self, kind: &'static str, status: u16, body: &str) -> Self {
            self.responses.insert(
                kind,
                ApiResponse {
                    status,
                    body: body.to_string(),
                },
            );
            self
        }

        pub(crate) fn fail_transport(mut self, kind: &'static str) -> Self {
            self.transport_failures.push(kind);
            self
        }

        pub(crate) async fn paths(&self) -> Vec<String> {
            self.calls.lock().await.iter().map(|(p, _)| p.clone()).collect()
        }
    }

    #[async_trait]
    impl BillingApi for ScriptedApi {
        async fn post_json(&self, path: &str, payload: &serde_json::Value) -> Result<ApiResponse> {
            self.calls
                .lock()
                .await
                .push((path.to_string(), payload.clone()));

            let kind = path.rsplit('/').next().unwrap_or_default();
            if self.transport_failures.contains(&kind) {
                return Err(ImportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset by peer",
                )));
            }

            Ok(self.responses.get(kind).cloned().unwrap_or(ApiResponse {
                status: 404,
                body: "not found".to_string(),
            }))
        }
    }

    fn customer_row() -> Row {
        Row::new(1)
            .with(CUSTOMER_EMAIL, "a@b.com")
            .with(CUSTOMER_FULL_NAME, "Jane Doe")
    }

    #[tokio::test]
    async fn test_customer_only_row_makes_one_call() {
        let api = ScriptedApi::new();
        let processor = RowProcessor::new(api.clone());

        let result = processor.process(&customer_row()).await;

        assert_eq!(
            result,
            RowResult::Success {
                customer_id: "ctm_01".to_string()
            }
        );
        assert_eq!(api.paths().await, vec!["/customers"]);
    }

    #[tokio::test]
    async fn test_full_row_creates_address_and_business() {
        let api = ScriptedApi::new();
        let processor = RowProcessor::new(api.clone());
        let row = customer_row()
            .with(ADDRESS_COUNTRY_CODE, "US")
            .with(BUSINESS_NAME, "Acme")
            .with(BUSINESS_TAX_IDENTIFIER, "GB123");

        let result = processor.process(&row).await;

        assert!(matches!(result, RowResult::Success { .. }));
        assert_eq!(
            api.paths().await,
            vec![
                "/customers",
                "/customers/ctm_01/addresses",
                "/customers/ctm_01/businesses"
            ]
        );

        let calls = api.calls.lock().await;
        assert_eq!(calls[2].1["tax_identifier"], "GB123");
        assert_eq!(calls[2].1["contacts"][0]["email"], "a@b.com");
    }

    #[tokio::test]
    async fn test_customer_failure_skips_dependents() {
        let api = ScriptedApi::new().respond("customers", 400, r#"{"error":"invalid email"}"#);
        let processor = RowProcessor::new(api.clone());
        let row = customer_row()
            .with(ADDRESS_COUNTRY_CODE, "US")
            .with(BUSINESS_NAME, "Acme");

        let result = processor.process(&row).await;

        assert_eq!(
            result,
            RowResult::Failure {
                error: r#"Failed to create customer a@b.com: {"error":"invalid email"}"#.to_string()
            }
        );
        assert_eq!(api.paths().await, vec!["/customers"]);
    }

    #[tokio::test]
    async fn test_address_failure_is_partial_success() {
        let api = ScriptedApi::new().respond("addresses", 400, "bad country");
        let processor = RowProcessor::new(api.clone());
        let row = customer_row()
            .with(ADDRESS_COUNTRY_CODE, "ZZ")
            .with(BUSINESS_NAME, "Acme");

        let result = processor.process(&row).await;

        assert_eq!(
            result,
            RowResult::PartialSuccess {
                customer_id: "ctm_01".to_string(),
                errors: vec!["Failed to create address for a@b.com: bad country".to_string()],
            }
        );
        assert_eq!(api.paths().await.len(), 3);
    }

    #[tokio::test]
    async fn test_business_transport_error_is_sub_error() {
        let api = ScriptedApi::new().fail_transport("businesses");
        let processor = RowProcessor::new(api);
        let row = customer_row().with(BUSINESS_NAME, "Acme");

        match processor.process(&row).await {
            RowResult::PartialSuccess { errors, .. } => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].starts_with("Failed to create business for a@b.com:"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_column_is_row_error() {
        let api = ScriptedApi::new();
        let processor = RowProcessor::new(api.clone());
        let row = Row::new(2).with(CUSTOMER_FULL_NAME, "Bob");

        let result = processor.process(&row).await;

        assert_eq!(
            result,
            RowResult::Failure {
                error: "Error processing row 2: missing column 'customer_email'".to_string()
            }
        );
        assert!(api.paths().await.is_empty());
    }

    #[tokio::test]
    async fn test_created_without_id_is_row_error() {
        let api = ScriptedApi::new().respond("customers", 201, r#"{"data":{}}"#);
        let processor = RowProcessor::new(api);

        match processor.process(&customer_row()).await {
            RowResult::Failure { error } => {
                assert!(error.starts_with("Error processing row 1:"));
                assert!(error.contains("data.id"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_customer_transport_error_is_row_error() {
        let api = ScriptedApi::new().fail_transport("customers");
        let processor = RowProcessor::new(api);

        match processor.process(&customer_row()).await {
            RowResult::Failure { error } => {
                assert!(error.starts_with("Error processing row 1: IO error:"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
