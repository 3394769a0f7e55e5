use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::{paths, ApiClient, ApiRequest, Operation, RequestBody};
use crate::coordinator::RequestKey;
use crate::errors::ApiError;
use crate::models::{ApiResponse, Settings, UserProfile};

impl ApiClient {
    /// GET /user/profile
    pub async fn get_profile(&self) -> Result<ApiResponse<UserProfile>, ApiError> {
        self.read(
            RequestKey::path(paths::PROFILE),
            ApiRequest::get(paths::PROFILE),
        )
        .await
    }

    /// POST /user/profile
    pub async fn create_profile(
        &self,
        profile: &UserProfile,
    ) -> Result<ApiResponse<UserProfile>, ApiError> {
        self.save_profile(Method::POST, profile).await
    }

    /// PUT /user/profile
    pub async fn update_profile(
        &self,
        profile: &UserProfile,
    ) -> Result<ApiResponse<UserProfile>, ApiError> {
        self.save_profile(Method::PUT, profile).await
    }

    async fn save_profile(
        &self,
        method: Method,
        profile: &UserProfile,
    ) -> Result<ApiResponse<UserProfile>, ApiError> {
        let request = ApiRequest::new(
            method,
            paths::PROFILE,
            RequestBody::Json(serde_json::to_value(profile)?),
        );
        let response: ApiResponse<UserProfile> =
            self.write(Operation::SaveProfile, request).await?;
        if response.success {
            info!("Profile saved");
        }
        Ok(response)
    }

    /// DELETE /user/profile
    pub async fn delete_profile(&self) -> Result<ApiResponse<()>, ApiError> {
        let request = ApiRequest::new(Method::DELETE, paths::PROFILE, RequestBody::Empty);
        self.write(Operation::DeleteProfile, request).await
    }

    /// GET /analytics/:report
    pub async fn get_analytics(&self, report: &str) -> Result<ApiResponse<Value>, ApiError> {
        let report = report.trim().trim_matches('/');
        if report.is_empty() {
            return Err(ApiError::Validation("Analytics report name is required".into()));
        }
        let path = format!("{}/{report}", paths::ANALYTICS);
        self.read(RequestKey::path(&path), ApiRequest::get(path)).await
    }

    /// GET /settings
    pub async fn get_settings(&self) -> Result<ApiResponse<Settings>, ApiError> {
        self.read(
            RequestKey::path(paths::SETTINGS),
            ApiRequest::get(paths::SETTINGS),
        )
        .await
    }

    /// PUT /settings
    pub async fn update_settings(
        &self,
        settings: &Settings,
    ) -> Result<ApiResponse<Settings>, ApiError> {
        let request = ApiRequest::new(
            Method::PUT,
            paths::SETTINGS,
            RequestBody::Json(serde_json::to_value(settings)?),
        );
        self.write(Operation::SaveSettings, request).await
    }
}
