//! HTTP submission gateway for the Souk ad API.
//!
//! Provides a minimal client with configurable auth (Bearer token or
//! X-API-Key) and the `SubmissionGateway` implementation that turns an
//! encoded `SubmissionPayload` into a multipart POST. The pipeline does not
//! retry; rejection envelopes are returned to the wizard as-is.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use std::time::Duration;

use souk_core::config::WizardConfig;
use souk_core::gateway::{SubmissionGateway, SubmitEnvelope};
use souk_core::{SubmissionPayload, SubmissionTarget};

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
    /// Unauthenticated (development servers)
    None,
}

/// HTTP client for the Souk ad API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_prefix: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_prefix: format!("/api/{}", WizardConfig::default().api_version),
            auth,
        })
    }

    /// Override the API version segment (`/api/{version}`).
    pub fn with_api_version(mut self, version: &str) -> Self {
        self.api_prefix = format!("/api/{}", version.trim_matches('/'));
        self
    }

    /// Create a client from the wizard configuration. Uses X-API-Key auth
    /// when a key is configured.
    pub fn from_config(config: &WizardConfig) -> Result<Self> {
        let auth = match &config.api_key {
            Some(key) => Auth::XApiKey(key.clone()),
            None => Auth::None,
        };
        Ok(Self::new(
            config.api_url.clone(),
            auth,
            Duration::from_secs(config.submit_timeout_secs),
        )?
        .with_api_version(&config.api_version))
    }

    /// Create a client from the environment: SOUK_API_URL, SOUK_API_KEY.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&WizardConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
            Auth::None => request,
        }
    }

    /// Submission endpoint for the payload's target: POST `/ads` for a new
    /// ad, POST `/ads/{id}` for an edit.
    fn submission_path(&self, target: SubmissionTarget) -> String {
        match target {
            SubmissionTarget::Create => format!("{}/ads", self.api_prefix),
            SubmissionTarget::Update(id) => format!("{}/ads/{}", self.api_prefix, id),
        }
    }
}

/// Convert an encoded payload into a reqwest multipart form.
fn to_multipart(payload: &SubmissionPayload) -> Result<multipart::Form> {
    let mut form = multipart::Form::new();
    for (name, value) in &payload.fields {
        form = form.text(name.clone(), value.clone());
    }
    for file in &payload.files {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .with_context(|| format!("Invalid content type: {}", file.content_type))?;
        form = form.part(file.field_name, part);
    }
    Ok(form)
}

#[async_trait]
impl SubmissionGateway for ApiClient {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmitEnvelope> {
        let url = self.build_url(&self.submission_path(payload.target));
        let form = to_multipart(&payload)?;

        let request = self.apply_auth(self.client.post(&url).multipart(form));
        let response = request
            .send()
            .await
            .context("Failed to send ad submission")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read submission response")?;

        // Rejections come back as an envelope regardless of status code;
        // anything unparseable is a transport-level failure.
        match serde_json::from_str::<SubmitEnvelope>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(anyhow::anyhow!(
                "Ad submission failed with status {}: {}",
                status,
                body
            )),
            Err(e) => Err(anyhow::anyhow!(
                "Failed to parse submission response: {}",
                e
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use souk_core::FilePart;
    use uuid::Uuid;

    fn payload(target: SubmissionTarget) -> SubmissionPayload {
        SubmissionPayload {
            target,
            fields: vec![
                ("adType".to_string(), "product".to_string()),
                ("title".to_string(), "Chair".to_string()),
            ],
            files: vec![FilePart {
                field_name: "images",
                file_name: "chair.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: Bytes::from_static(&[0xFF, 0xD8]),
            }],
        }
    }

    fn client() -> ApiClient {
        ApiClient::new(
            "http://localhost:3000".to_string(),
            Auth::None,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn submission_paths_follow_target() {
        let client = client();
        assert_eq!(
            client.submission_path(SubmissionTarget::Create),
            "/api/v0/ads"
        );
        let id = Uuid::new_v4();
        assert_eq!(
            client.submission_path(SubmissionTarget::Update(id)),
            format!("/api/v0/ads/{}", id)
        );
    }

    #[test]
    fn api_version_is_client_state() {
        let client = client().with_api_version("v2");
        assert_eq!(
            client.submission_path(SubmissionTarget::Create),
            "/api/v2/ads"
        );

        let config = WizardConfig {
            api_version: "v3".to_string(),
            ..Default::default()
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(
            client.submission_path(SubmissionTarget::Create),
            "/api/v3/ads"
        );
    }

    #[test]
    fn multipart_conversion_accepts_valid_payloads() {
        assert!(to_multipart(&payload(SubmissionTarget::Create)).is_ok());
    }

    #[test]
    fn multipart_conversion_rejects_bad_content_type() {
        let mut p = payload(SubmissionTarget::Create);
        p.files[0].content_type = "not a mime".to_string();
        assert!(to_multipart(&p).is_err());
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new(
            "http://localhost:3000/".to_string(),
            Auth::None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.build_url("/api/v0/ads"), "http://localhost:3000/api/v0/ads");
    }
}
