use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::ApiClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{CustomModel, PlanSettings};

const ORG_HEADER: &str = "X-Org-Id";

pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    token: String,
    org_id: Option<String>,
}

/// Error body shapes the server may return.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "message", alias = "error")]
    msg: String,
}

impl HttpApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, token, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        if base_url.is_empty() {
            return Err(ApiError::Config("API url is empty".to_string()));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid API url '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("invalid API url '{}'", base_url)));
        }

        let client = Client::builder()
            .user_agent(concat!("modelctl/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.to_string(),
            org_id: None,
        })
    }

    /// Build a client from loaded configuration. Fails when no token is set.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let token = config
            .require_token()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        let mut client = Self::with_timeout(
            &config.api.url,
            token,
            Duration::from_secs(config.api.timeout_secs),
        )?;
        client.org_id = config.auth.org_id.clone().filter(|o| !o.is_empty());
        Ok(client)
    }

    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base url. Each segment is percent-encoded,
    /// so ids and branch names containing `/`, `?` or `#` stay one segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.bearer_auth(&self.token);
        match &self.org_id {
            Some(org) => request.header(ORG_HEADER, org),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        tracing::warn!("API request failed with {}: {}", status, message);

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => Some(parsed.msg),
        Err(_) => Some(body.to_string()),
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn list_custom_models(&self) -> Result<Vec<CustomModel>, ApiError> {
        // The server encodes an empty list as `null`
        let models: Option<Vec<CustomModel>> = self.get_json(&["custom_models"]).await?;
        Ok(models.unwrap_or_default())
    }

    async fn create_custom_model(&self, model: &CustomModel) -> Result<(), ApiError> {
        let url = self.endpoint(&["custom_models"]);
        tracing::debug!("POST {} ({})", url, model.model_name);

        self.send(self.client.post(url).json(model)).await?;
        Ok(())
    }

    async fn delete_custom_model(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["custom_models", id]);
        tracing::debug!("DELETE {}", url);

        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn get_settings(&self, plan_id: &str, branch: &str) -> Result<PlanSettings, ApiError> {
        self.get_json(&["plans", plan_id, branch, "settings"]).await
    }
}
