//! In-memory `ApiClient` for command tests.

use async_trait::async_trait;
use modelctl_core::{ApiClient, ApiError, CustomModel, ModelProvider, PlanSettings};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeClient {
    pub models: Vec<CustomModel>,
    pub settings: PlanSettings,
    fail_delete: bool,
    calls: Mutex<Vec<&'static str>>,
    created: Mutex<Vec<CustomModel>>,
    deleted: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn with_models(models: Vec<CustomModel>) -> Self {
        Self {
            models,
            ..Default::default()
        }
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<CustomModel> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ApiClient for FakeClient {
    async fn list_custom_models(&self) -> Result<Vec<CustomModel>, ApiError> {
        self.record("list");
        Ok(self.models.clone())
    }

    async fn create_custom_model(&self, model: &CustomModel) -> Result<(), ApiError> {
        self.record("create");
        self.created.lock().unwrap().push(model.clone());
        Ok(())
    }

    async fn delete_custom_model(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete");
        if self.fail_delete {
            return Err(ApiError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn get_settings(&self, _plan_id: &str, _branch: &str) -> Result<PlanSettings, ApiError> {
        self.record("settings");
        Ok(self.settings.clone())
    }
}

pub fn model(name: &str, id: &str) -> CustomModel {
    CustomModel {
        id: id.to_string(),
        model_name: name.to_string(),
        provider: ModelProvider::Custom,
        base_url: String::new(),
        max_tokens: 4096,
        api_key_env_var: String::new(),
        description: String::new(),
        created_at: None,
        updated_at: None,
    }
}
