//! Network-backed redemption client.
//!
//! Speaks the course platform's `/auth` API. Selecting this backend instead
//! of [`crate::LocalBackend`] is a construction-time choice; the facade and
//! its observable ordering stay the same.

use crate::device::DeviceInfo;
use crate::error::{AuthError, AuthResult};
use crate::{CodeBackend, RedeemGrant};
use akademi_license::LicenseCode;
use akademi_types::{Clock, DeviceId, SystemClock, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Configuration for the remote backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the API, e.g. `https://api.akademi.app/v1`.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.akademi.app/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

const VALIDATE_PATH: &str = "/auth/validate-code";
const LOGOUT_PATH: &str = "/auth/logout";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest<'a> {
    code: &'a str,
    device_id: &'a str,
    device_info: &'a DeviceInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResponse {
    token: String,
    user_id: String,
    package: crate::Package,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// A [`CodeBackend`] that validates codes against the platform API.
pub struct RemoteBackend {
    config: RemoteConfig,
    http: reqwest::Client,
    clock: Arc<dyn Clock>,
    info: DeviceInfo,
}

impl RemoteBackend {
    /// Creates a remote backend from configuration.
    pub fn new(config: RemoteConfig) -> AuthResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a remote backend with an explicit clock.
    pub fn with_clock(config: RemoteConfig, clock: Arc<dyn Clock>) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| AuthError::Backend(err.to_string()))?;
        Ok(Self {
            config,
            http,
            clock,
            info: DeviceInfo::collect(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CodeBackend for RemoteBackend {
    async fn redeem(&self, code: &LicenseCode, device: &DeviceId) -> AuthResult<RedeemGrant> {
        let request = ValidateRequest {
            code: code.as_str(),
            device_id: device.as_str(),
            device_info: &self.info,
        };

        let response = self
            .http
            .post(self.url(VALIDATE_PATH))
            .json(&request)
            .send()
            .await
            .map_err(|err| AuthError::Backend(err.to_string()))?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Err(AuthError::DeviceConflict);
        }
        if !response.status().is_success() {
            let message = response
                .json::<ApiError>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| "code validation failed".to_string());
            return Err(AuthError::Backend(message));
        }

        let body: ValidateResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Backend(err.to_string()))?;

        debug!(code = %code.masked(), "code validated by server");
        Ok(RedeemGrant {
            user_id: UserId::new(body.user_id),
            token: body.token,
            package: body.package,
            login_at: self.clock.now(),
            expires_at: body.expires_at,
        })
    }

    async fn revoke(&self, token: &str) -> AuthResult<()> {
        let response = self
            .http
            .post(self.url(LOGOUT_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| AuthError::Backend(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Backend(format!(
                "logout rejected with status {}",
                response.status()
            )));
        }
        Ok(())
    }

    fn device_info(&self) -> DeviceInfo {
        self.info.clone()
    }
}
