//! HTTP client for the ML platform API.
//!
//! The backend is a black box behind four REST operations: an
//! endpoint-status query, deploy/withdraw commands, and a model listing.
//! The watcher consumes this module through the [`PlatformApi`] trait so
//! tests can substitute a scripted implementation.

use crate::error::{Result, VigilError};
use crate::model::{ModelId, ModelSummary};
use crate::status::DeploymentStatus;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// API Types
// ============================================================================

/// Response body of the endpoint-status query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointStatusResponse {
    /// Status label as reported by the platform.
    pub endpoint_status: DeploymentStatus,
}

/// Request body for deploy and withdraw commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentCommand {
    /// Model to deploy or withdraw.
    pub model_id: ModelId,
}

/// Authentication configuration.
#[derive(Debug, Clone, Default)]
pub enum ApiAuth {
    /// No authentication.
    #[default]
    None,
    /// Bearer token, as issued by the platform's login flow.
    Token(String),
}

// ============================================================================
// Platform API Trait
// ============================================================================

/// The operations the watcher needs from the platform.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Query the deployment status of an endpoint.
    async fn endpoint_status(&self, endpoint_name: &str) -> Result<DeploymentStatus>;

    /// Ask the platform to deploy a model.
    async fn deploy(&self, model_id: ModelId) -> Result<()>;

    /// Ask the platform to withdraw a deployed model.
    async fn withdraw(&self, model_id: ModelId) -> Result<()>;

    /// List all models visible to the caller.
    async fn list_models(&self) -> Result<Vec<ModelSummary>>;
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Reqwest-backed platform API client.
#[derive(Debug)]
pub struct ApiClient {
    /// Base URL of the platform API.
    base_url: String,
    /// Authentication configuration.
    auth: ApiAuth,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(VigilError::InvalidBaseUrl("(empty)".to_string()));
        }

        Ok(Self {
            base_url,
            auth: ApiAuth::None,
            client: reqwest::Client::builder()
                .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
                .build()?,
        })
    }

    /// Set authentication.
    #[must_use]
    pub fn with_auth(mut self, auth: ApiAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if authentication is configured.
    #[must_use]
    pub fn has_auth(&self) -> bool {
        !matches!(self.auth, ApiAuth::None)
    }

    fn build_request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.request(method, url);
        if let ApiAuth::Token(token) = &self.auth {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VigilError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| VigilError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl PlatformApi for ApiClient {
    async fn endpoint_status(&self, endpoint_name: &str) -> Result<DeploymentStatus> {
        let url = format!(
            "{}/api/model/endpoint/?endpoint_name={}",
            self.base_url, endpoint_name
        );
        let response = self
            .build_request(reqwest::Method::GET, &url)
            .send()
            .await?;

        let body: EndpointStatusResponse = self.handle_response(response).await?;
        Ok(body.endpoint_status)
    }

    async fn deploy(&self, model_id: ModelId) -> Result<()> {
        let url = format!("{}/api/model/deploy/", self.base_url);
        let response = self
            .build_request(reqwest::Method::POST, &url)
            .json(&DeploymentCommand { model_id })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VigilError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn withdraw(&self, model_id: ModelId) -> Result<()> {
        let url = format!("{}/api/model/withdraw/", self.base_url);
        let response = self
            .build_request(reqwest::Method::POST, &url)
            .json(&DeploymentCommand { model_id })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VigilError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<ModelSummary>> {
        let url = format!("{}/api/model/", self.base_url);
        let response = self
            .build_request(reqwest::Method::GET, &url)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // API Types Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_endpoint_status_response_deserialize() {
        let json = r#"{"endpoint_status":"Creating"}"#;
        let response: EndpointStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.endpoint_status, DeploymentStatus::Creating);
    }

    #[test]
    fn test_endpoint_status_response_unrecognized_label() {
        let json = r#"{"endpoint_status":"SomethingNew"}"#;
        let response: EndpointStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.endpoint_status, DeploymentStatus::Unknown);
    }

    #[test]
    fn test_endpoint_status_response_missing_field() {
        let json = r#"{"status":"Creating"}"#;
        let result = serde_json::from_str::<EndpointStatusResponse>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deployment_command_serialize() {
        let command = DeploymentCommand {
            model_id: ModelId::new(12),
        };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"model_id":12}"#);
    }

    // -------------------------------------------------------------------------
    // Client Construction Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("https://platform.example.com").unwrap();
        assert_eq!(client.base_url(), "https://platform.example.com");
        assert!(!client.has_auth());
    }

    #[test]
    fn test_api_client_trailing_slash() {
        let client = ApiClient::new("https://platform.example.com/").unwrap();
        assert_eq!(client.base_url(), "https://platform.example.com");
    }

    #[test]
    fn test_api_client_empty_base_url() {
        assert!(matches!(
            ApiClient::new(""),
            Err(VigilError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_api_client_with_auth() {
        let client = ApiClient::new("https://platform.example.com")
            .unwrap()
            .with_auth(ApiAuth::Token("token".to_string()));
        assert!(client.has_auth());
    }

    #[test]
    fn test_api_auth_default() {
        assert!(matches!(ApiAuth::default(), ApiAuth::None));
    }
}
