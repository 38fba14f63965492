//! The transport boundary.
//!
//! Everything upstream of normalization is behind [`ClassSource`]: one JSON
//! response body per object class, or `None` when the fetch failed. A failed
//! or absent fetch degrades that category to an empty collection downstream;
//! it is never fatal to the pipeline.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mo_diff_core::{decode_value, RawRecord};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::category::ApiClass;

/// A provider of raw class payloads.
pub trait ClassSource {
    /// Fetch the response body for one class. `None` means the payload is
    /// unavailable (failed request, timeout, missing file).
    fn fetch(&self, class: ApiClass) -> Option<Value>;

    /// Label describing where payloads come from, used in snapshot file
    /// names.
    fn label(&self) -> String;
}

/// Fetch and decode one class, degrading every failure mode to an empty
/// record list.
pub fn fetch_records(source: &dyn ClassSource, class: ApiClass) -> Vec<RawRecord> {
    let Some(body) = source.fetch(class) else {
        return Vec::new();
    };
    decode_value(&body).unwrap_or_else(|err| {
        warn!(class = class.class_name(), %err, "undecodable payload, treating category as empty");
        Vec::new()
    })
}

/// Errors establishing a controller session. Per-class fetch failures are
/// not errors (they degrade); only the login handshake can fail hard.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("could not reach controller {host}: {source}")]
    Connect {
        host: String,
        source: reqwest::Error,
    },
    #[error("login to {host} rejected: {reason}")]
    LoginRejected { host: String, reason: String },
}

/// Connection options for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Verify the controller's TLS certificate. Controllers commonly ship
    /// self-signed certificates, so this is configurable, but it is on by
    /// default.
    pub verify_tls: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            verify_tls: true,
        }
    }
}

/// Cookie-authenticated HTTP session against a live controller.
pub struct HttpSource {
    host: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Authenticate against the controller and return a session-holding
    /// source. The session cookie set by the login response authenticates
    /// every subsequent class fetch.
    pub fn login(
        host: &str,
        username: &str,
        password: &str,
        options: &HttpOptions,
    ) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(!options.verify_tls)
            .timeout(options.timeout)
            .build()
            .map_err(SourceError::Client)?;

        let payload = serde_json::json!({
            "aaaUser": {"attributes": {"name": username, "pwd": password}}
        });
        let response = client
            .post(format!("https://{host}/api/aaaLogin.json"))
            .json(&payload)
            .send()
            .map_err(|source| SourceError::Connect {
                host: host.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SourceError::LoginRejected {
                host: host.to_string(),
                reason: format!("status {}", response.status()),
            });
        }
        let body: Value = response.json().map_err(|source| SourceError::Connect {
            host: host.to_string(),
            source,
        })?;
        if login_rejected(&body) {
            return Err(SourceError::LoginRejected {
                host: host.to_string(),
                reason: "invalid credentials".to_string(),
            });
        }

        Ok(Self {
            host: host.to_string(),
            client,
        })
    }
}

/// A successful login still returns an `error` record when the credentials
/// were wrong.
fn login_rejected(body: &Value) -> bool {
    body.get("imdata")
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
        .and_then(Value::as_object)
        .is_some_and(|entry| entry.contains_key("error"))
}

impl ClassSource for HttpSource {
    fn fetch(&self, class: ApiClass) -> Option<Value> {
        let mut url = format!(
            "https://{}/api/node/class/{}.json",
            self.host,
            class.class_name()
        );
        if let Some(query) = class.query() {
            url.push('?');
            url.push_str(query);
        }

        match self
            .client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
        {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(class = class.class_name(), %err, "fetch failed, treating category as empty");
                None
            }
        }
    }

    fn label(&self) -> String {
        self.host.clone()
    }
}

/// Payload directory source: one `<class>.json` file per class, as captured
/// out-of-band. Makes every pipeline stage drivable without a controller.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ClassSource for DirSource {
    fn fetch(&self, class: ApiClass) -> Option<Value> {
        let path = self.dir.join(format!("{}.json", class.class_name()));
        if !path.exists() {
            debug!(path = %path.display(), "payload file absent, treating category as empty");
            return None;
        }
        read_json(&path).map_or_else(
            |err| {
                warn!(path = %path.display(), %err, "unreadable payload file, treating category as empty");
                None
            },
            Some,
        )
    }

    fn label(&self) -> String {
        self.dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "local".to_string())
    }
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::{fetch_records, login_rejected, ClassSource, DirSource};
    use crate::category::ApiClass;

    #[test]
    fn dir_source_reads_class_payload_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("faultInst.json"),
            r#"{"imdata": [{"faultInst": {"attributes": {"dn": "f1", "severity": "critical"}}}]}"#,
        )
        .expect("write payload");

        let source = DirSource::new(dir.path());
        let records = fetch_records(&source, ApiClass::FaultInst);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attr("dn"), Some("f1"));
    }

    #[test]
    fn absent_and_broken_payloads_degrade_to_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("l1PhysIf.json"), "{not json").expect("write payload");

        let source = DirSource::new(dir.path());
        assert!(source.fetch(ApiClass::FaultInst).is_none());
        assert!(fetch_records(&source, ApiClass::FaultInst).is_empty());
        assert!(fetch_records(&source, ApiClass::PhysIf).is_empty());
    }

    #[test]
    fn login_error_entries_are_detected() {
        assert!(login_rejected(&json!({
            "imdata": [{"error": {"attributes": {"code": "401"}}}]
        })));
        assert!(!login_rejected(&json!({
            "imdata": [{"aaaLogin": {"attributes": {"token": "t"}}}]
        })));
        assert!(!login_rejected(&json!({"imdata": []})));
    }
}
