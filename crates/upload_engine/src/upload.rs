use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use upload_logging::{upload_debug, upload_info};

use crate::{FailureKind, UploadError, UploadOutput};

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/submit";
/// Multipart field carrying the file.
pub const DEFAULT_FIELD_NAME: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub endpoint: String,
    pub field_name: String,
    /// `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    /// `None` waits indefinitely; a hung server keeps the upload in flight.
    pub request_timeout: Option<Duration>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl UploadSettings {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadOutput, UploadError>;
}

/// Posts the file as `multipart/form-data` with a single part.
#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadOutput, UploadError> {
        let url = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| UploadError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let byte_len = bytes.len();
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part(self.settings.field_name.clone(), part);

        upload_info!(
            "POST {} field={} file={} bytes={}",
            url,
            self.settings.field_name,
            file_name,
            byte_len
        );

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let reason = reason_phrase(status);
            return Err(UploadError::new(
                FailureKind::HttpStatus {
                    code: status.as_u16(),
                    reason,
                },
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        upload_debug!(
            "Upload of {} answered {} with {} bytes ({:?})",
            file_name,
            status,
            body.len(),
            content_type
        );

        Ok(UploadOutput {
            status: status.as_u16(),
            content_type,
            bytes: body.to_vec(),
        })
    }
}

/// Reason phrase for display; falls back to the numeric code for unregistered statuses.
pub fn reason_phrase(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| status.as_u16().to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_phrase_uses_canonical_text() {
        assert_eq!(reason_phrase(reqwest::StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(
            reason_phrase(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            "Internal Server Error"
        );
    }

    #[test]
    fn reason_phrase_falls_back_to_code() {
        let status = reqwest::StatusCode::from_u16(599).unwrap();
        assert_eq!(reason_phrase(status), "599");
    }

    #[test]
    fn default_settings_have_no_timeouts() {
        let settings = UploadSettings::default();
        assert_eq!(settings.field_name, "file");
        assert!(settings.endpoint.ends_with("/api/submit"));
        assert_eq!(settings.connect_timeout, None);
        assert_eq!(settings.request_timeout, None);
    }
}
