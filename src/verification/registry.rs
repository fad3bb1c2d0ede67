use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::models::RegistryRecord;
use crate::utils::IdCheckError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("API request timed out")]
    Timeout,
    #[error("API request failed: {0}")]
    Request(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Invalid registry response: {0}")]
    Decode(String),
}

/// Authoritative lookup of a document identifier.
pub trait RegistryLookup: Send + Sync {
    fn verify_identifier(&self, identifier: &str) -> Result<RegistryRecord, RegistryError>;
}

#[derive(Debug, Default, Deserialize)]
struct RegistryResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<RegistryData>,
}

#[derive(Debug, Default, Deserialize)]
struct RegistryData {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    dob: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    aadhaar_linked: Option<bool>,
}

impl RegistryResponse {
    fn into_record(self, identifier: &str) -> Result<RegistryRecord, RegistryError> {
        match (self.success, self.data) {
            (true, Some(data)) => {
                let trimmed = |value: Option<String>| value.unwrap_or_default().trim().to_string();
                Ok(RegistryRecord {
                    name: trimmed(data.full_name),
                    date_of_birth: trimmed(data.dob),
                    gender: trimmed(data.gender).to_lowercase(),
                    identifier: identifier.to_string(),
                    linked_flag: data.aadhaar_linked,
                })
            }
            _ => Err(RegistryError::Rejected(
                self.message.unwrap_or_else(|| "API verification failed".to_string()),
            )),
        }
    }
}

/// JSON-over-HTTPS registry client (Surepass-style PAN endpoint).
pub struct HttpRegistryClient {
    client: reqwest::blocking::Client,
    url: String,
    token: String,
}

impl HttpRegistryClient {
    pub fn new(url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self, IdCheckError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdCheckError::Config(format!("Failed to build registry client: {}", e)))?;
        Ok(HttpRegistryClient {
            client,
            url: url.into(),
            token: token.into(),
        })
    }
}

impl RegistryLookup for HttpRegistryClient {
    fn verify_identifier(&self, identifier: &str) -> Result<RegistryRecord, RegistryError> {
        info!("Calling registry for identifier {}", identifier);
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&json!({ "id_number": identifier }))
            .send()
            .map_err(|e| {
                warn!("Registry request failed: {}", e);
                if e.is_timeout() {
                    RegistryError::Timeout
                } else {
                    RegistryError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        let body: RegistryResponse = response
            .json()
            .map_err(|e| RegistryError::Decode(format!("status {}: {}", status, e)))?;
        debug!("Registry response ({}): {:?}", status, body);

        body.into_record(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> RegistryResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_successful_response() {
        let body = parse(
            r#"{"success": true, "data": {"full_name": " ROHAN KUMAR ", "dob": "1990-06-05",
                "gender": "M", "aadhaar_linked": true}, "message": null}"#,
        );
        let record = body.into_record("ABCDE1234F").unwrap();
        assert_eq!(record.name, "ROHAN KUMAR");
        assert_eq!(record.date_of_birth, "1990-06-05");
        assert_eq!(record.gender, "m");
        assert_eq!(record.identifier, "ABCDE1234F");
        assert_eq!(record.linked_flag, Some(true));
    }

    #[test]
    fn test_rejected_response_keeps_message() {
        let body = parse(r#"{"success": false, "message": "Invalid PAN"}"#);
        assert_eq!(
            body.into_record("ABCDE1234F"),
            Err(RegistryError::Rejected("Invalid PAN".to_string()))
        );
    }

    #[test]
    fn test_missing_data_uses_default_message() {
        let body = parse(r#"{"success": true}"#);
        let err = body.into_record("ABCDE1234F").unwrap_err();
        assert_eq!(err.to_string(), "API verification failed");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(RegistryError::Timeout.to_string(), "API request timed out");
        assert_eq!(
            RegistryError::Request("connection refused".to_string()).to_string(),
            "API request failed: connection refused"
        );
    }
}
