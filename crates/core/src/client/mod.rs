pub mod http;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{CustomModel, PlanSettings};

/// Remote operations the CLI depends on.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn list_custom_models(&self) -> Result<Vec<CustomModel>, ApiError>;

    async fn create_custom_model(&self, model: &CustomModel) -> Result<(), ApiError>;

    async fn delete_custom_model(&self, id: &str) -> Result<(), ApiError>;

    async fn get_settings(&self, plan_id: &str, branch: &str) -> Result<PlanSettings, ApiError>;
}

pub use http::HttpApiClient;
