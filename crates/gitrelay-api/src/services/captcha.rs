//! CAPTCHA gate in front of the upload endpoints.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use gitrelay_core::{AppError, CaptchaConfig};
use serde::Deserialize;

/// Verifies a client-supplied CAPTCHA response token
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(true)` when the provider accepted the token.
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool, AppError>;
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

/// hCaptcha / reCAPTCHA style `siteverify` client
pub struct HttpCaptchaVerifier {
    http_client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl Debug for HttpCaptchaVerifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("HttpCaptchaVerifier")
            .field("verify_url", &self.verify_url)
            .finish()
    }
}

impl HttpCaptchaVerifier {
    pub fn new(verify_url: impl Into<String>, secret: impl Into<String>) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            verify_url: verify_url.into(),
            secret: secret.into(),
        })
    }

    /// Build a verifier when the gate is enabled; `None` otherwise.
    pub fn from_config(config: &CaptchaConfig) -> Result<Option<Self>, AppError> {
        if !config.enabled {
            return Ok(None);
        }
        let secret = config.secret.clone().ok_or_else(|| {
            AppError::Internal("CAPTCHA_ENABLED=true requires CAPTCHA_SECRET".to_string())
        })?;
        Self::new(config.verify_url.clone(), secret).map(Some)
    }
}

#[async_trait]
impl CaptchaVerifier for HttpCaptchaVerifier {
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool, AppError> {
        let mut form = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip.filter(|ip| *ip != "unknown") {
            form.push(("remoteip", ip));
        }

        let response = self
            .http_client
            .post(&self.verify_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "CAPTCHA verification request failed");
                AppError::CaptchaFailed(format!("verification service unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::CaptchaFailed(format!(
                "verification service returned {}",
                response.status()
            )));
        }

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| AppError::CaptchaFailed(format!("unreadable verification response: {}", e)))?;

        if !body.success {
            tracing::debug!(error_codes = ?body.error_codes, "CAPTCHA token rejected");
        }
        Ok(body.success)
    }
}

/// Enforce the gate: no-op when `verifier` is `None`.
pub async fn require_captcha(
    verifier: Option<&dyn CaptchaVerifier>,
    token: Option<&str>,
    remote_ip: Option<&str>,
) -> Result<(), AppError> {
    let Some(verifier) = verifier else {
        return Ok(());
    };

    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::CaptchaRequired)?;

    if verifier.verify(token, remote_ip).await? {
        Ok(())
    } else {
        Err(AppError::CaptchaFailed("token rejected".to_string()))
    }
}
