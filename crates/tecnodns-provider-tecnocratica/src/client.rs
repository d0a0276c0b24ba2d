// # Tecnocrática API Client
//
// Implements the four record capabilities against the Tecnocrática
// (Neodigit) REST API.
//
// ## Architectural Constraints
//
// - Makes plain HTTP calls only: no retry, no backoff, no caching
// - Every error is returned to the caller unchanged in kind
// - API token never appears in logs or `Debug` output
//
// ## API Reference
//
// - List zones: GET `/dns/zones`
// - List records: GET `/dns/zones/:zone_id/records`
// - Create record: POST `/dns/zones/:zone_id/records`
// - Update record: PUT `/dns/zones/:zone_id/records/:record_id`
// - Delete record: DELETE `/dns/zones/:zone_id/records/:record_id`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tecnodns_core::traits::{RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
use tecnodns_core::{Error, Record, RecordType, Result};

/// Tecnocrática API base URL
pub const DEFAULT_API_URL: &str = "https://api.neodigit.net/v1";

/// Header carrying the API token
pub const TOKEN_HEADER: &str = "X-TCPanel-Token";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER: &str = "tecnocratica";

#[derive(Debug, Deserialize)]
struct ApiZone {
    id: u64,
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiRecord {
    #[serde(default, skip_serializing)]
    id: Option<u64>,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    content: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    ttl: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prio: Option<u16>,
}

#[derive(Debug, Serialize)]
struct RecordEnvelope<'a> {
    record: &'a ApiRecord,
}

fn is_zero(ttl: &u64) -> bool {
    *ttl == 0
}

impl From<&Record> for ApiRecord {
    fn from(record: &Record) -> Self {
        Self {
            id: None,
            name: record.name.clone(),
            record_type: record.record_type.to_string(),
            content: record.data.clone(),
            ttl: record.ttl.as_secs(),
            prio: record.priority,
        }
    }
}

impl From<ApiRecord> for Record {
    fn from(api: ApiRecord) -> Self {
        Record {
            id: api.id.map(|id| id.to_string()),
            name: if api.name.is_empty() {
                "@".to_string()
            } else {
                api.name
            },
            record_type: api
                .record_type
                .parse()
                .unwrap_or_else(|never| match never {}),
            data: api.content,
            ttl: Duration::from_secs(api.ttl),
            priority: api.prio,
        }
    }
}

/// HTTP client for the Tecnocrática DNS API
pub struct TecnocraticaClient {
    /// API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// Base URL without trailing slash
    api_url: String,

    /// HTTP client for API requests; `None` if it could not be built
    client: Option<reqwest::Client>,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for TecnocraticaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TecnocraticaClient")
            .field("api_token", &"<REDACTED>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl TecnocraticaClient {
    /// Create a new client
    ///
    /// Never fails. The base URL is checked when a request is made, so a
    /// bad URL surfaces as `Error::Config` from the record operation.
    ///
    /// # Parameters
    ///
    /// - `api_token`: Tecnocrática API token
    /// - `api_url`: API base URL; empty selects [`DEFAULT_API_URL`]
    pub fn new(api_token: impl Into<String>, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        let api_url = if api_url.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            api_url.trim_end_matches('/').to_string()
        };

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .inspect_err(|e| tracing::warn!(error = %e, "failed to build HTTP client"))
            .ok();

        Self {
            api_token: api_token.into(),
            api_url,
            client,
        }
    }

    /// Base URL requests are sent to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Check that the base URL is an absolute http(s) URL
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: If the URL cannot be parsed or uses another scheme
    pub fn validate_url(&self) -> Result<()> {
        let parsed = reqwest::Url::parse(&self.api_url)
            .map_err(|e| Error::config(format!("invalid API URL '{}': {}", self.api_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "API URL must use HTTP or HTTPS scheme. Got: {}",
                self.api_url
            )));
        }
        Ok(())
    }

    fn request(&self, method: reqwest::Method, path: &str) -> Result<reqwest::RequestBuilder> {
        self.validate_url()?;
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::config("HTTP client could not be built"))?;

        Ok(client
            .request(method, format!("{}{}", self.api_url, path))
            .header(TOKEN_HEADER, &self.api_token)
            .header("Accept", "application/json"))
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        Err(match status.as_u16() {
            401 | 403 => Error::auth(format!(
                "Invalid API token or insufficient permissions. Status: {}",
                status
            )),
            404 => Error::not_found(format!("{}: {}", what, error_text)),
            429 => Error::rate_limited(format!("Please retry later. Status: {}", status)),
            _ => Error::provider(PROVIDER, format!("{} failed: {} - {}", what, status, error_text)),
        })
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
        response.json().await.map_err(|e| {
            Error::provider(PROVIDER, format!("Failed to parse {} response: {}", what, e))
        })
    }

    async fn zone_id(&self, zone: &str) -> Result<u64> {
        let wanted = zone.trim_end_matches('.');
        tracing::debug!(zone = wanted, "looking up zone ID");

        let response = self
            .send(self.request(reqwest::Method::GET, "/dns/zones")?, "zone lookup")
            .await?;
        let zones: Vec<ApiZone> = Self::parse(response, "zone lookup").await?;

        zones
            .into_iter()
            .find(|z| z.name.trim_end_matches('.').eq_ignore_ascii_case(wanted))
            .map(|z| z.id)
            .ok_or_else(|| Error::not_found(format!("Zone not found: {}", wanted)))
    }

    async fn list_records(&self, zone_id: u64) -> Result<Vec<Record>> {
        let path = format!("/dns/zones/{}/records", zone_id);
        let response = self
            .send(self.request(reqwest::Method::GET, &path)?, "record listing")
            .await?;
        let records: Vec<ApiRecord> = Self::parse(response, "record listing").await?;

        Ok(records.into_iter().map(Record::from).collect())
    }

    async fn create_record(&self, zone_id: u64, record: &Record) -> Result<Record> {
        let path = format!("/dns/zones/{}/records", zone_id);
        let body = ApiRecord::from(record);
        let response = self
            .send(
                self.request(reqwest::Method::POST, &path)?
                    .json(&RecordEnvelope { record: &body }),
                "record creation",
            )
            .await?;
        let created: ApiRecord = Self::parse(response, "record creation").await?;

        Ok(created.into())
    }

    async fn update_record(&self, zone_id: u64, record_id: &str, record: &Record) -> Result<Record> {
        let path = format!("/dns/zones/{}/records/{}", zone_id, record_id);
        let body = ApiRecord::from(record);
        let response = self
            .send(
                self.request(reqwest::Method::PUT, &path)?
                    .json(&RecordEnvelope { record: &body }),
                "record update",
            )
            .await?;
        let updated: ApiRecord = Self::parse(response, "record update").await?;

        Ok(updated.into())
    }

    async fn delete_record(&self, zone_id: u64, record_id: &str) -> Result<()> {
        let path = format!("/dns/zones/{}/records/{}", zone_id, record_id);
        self.send(self.request(reqwest::Method::DELETE, &path)?, "record deletion")
            .await?;
        Ok(())
    }
}

fn require_id(record: &Record) -> Result<&str> {
    record.id.as_deref().ok_or_else(|| {
        Error::provider(
            PROVIDER,
            format!("record {} {} has no ID", record.name, record.record_type),
        )
    })
}

fn same_name(a: &str, b: &str) -> bool {
    let norm = |n: &str| match n.trim_end_matches('.') {
        "" => "@".to_string(),
        other => other.to_ascii_lowercase(),
    };
    norm(a) == norm(b)
}

/// Whether an existing record already holds the wanted content
fn already_set(have: &Record, want: &Record) -> bool {
    have.data == want.data
        && have.priority == want.priority
        && (want.ttl.is_zero() || have.ttl == want.ttl)
}

#[async_trait]
impl RecordGetter for TecnocraticaClient {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        let zone_id = self.zone_id(zone).await?;
        self.list_records(zone_id).await
    }
}

#[async_trait]
impl RecordAppender for TecnocraticaClient {
    async fn append_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        let zone_id = self.zone_id(zone).await?;

        let mut created = Vec::with_capacity(records.len());
        for record in &records {
            created.push(self.create_record(zone_id, record).await?);
        }
        Ok(created)
    }
}

#[async_trait]
impl RecordSetter for TecnocraticaClient {
    async fn set_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        let zone_id = self.zone_id(zone).await?;
        let existing = self.list_records(zone_id).await?;

        // Group the input by (name, type), keeping first-seen order
        let mut groups: Vec<(String, RecordType, Vec<Record>)> = Vec::new();
        for record in records {
            match groups
                .iter_mut()
                .find(|(name, rtype, _)| same_name(name, &record.name) && *rtype == record.record_type)
            {
                Some((_, _, group)) => group.push(record),
                None => groups.push((record.name.clone(), record.record_type.clone(), vec![record])),
            }
        }

        let mut results = Vec::new();
        for (name, rtype, wanted) in groups {
            let mut current: Vec<&Record> = existing
                .iter()
                .filter(|r| same_name(&r.name, &name) && r.record_type == rtype)
                .collect();

            let mut pending = Vec::new();
            for want in wanted {
                match current.iter().position(|have| already_set(have, &want)) {
                    Some(pos) => results.push(current.remove(pos).clone()),
                    None => pending.push(want),
                }
            }

            for want in pending {
                if current.is_empty() {
                    results.push(self.create_record(zone_id, &want).await?);
                } else {
                    let have = current.remove(0);
                    results.push(self.update_record(zone_id, require_id(have)?, &want).await?);
                }
            }

            for surplus in current {
                self.delete_record(zone_id, require_id(surplus)?).await?;
            }
        }

        Ok(results)
    }
}

#[async_trait]
impl RecordDeleter for TecnocraticaClient {
    async fn delete_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        let zone_id = self.zone_id(zone).await?;
        let existing = self.list_records(zone_id).await?;

        let mut deleted = Vec::new();
        for record in existing {
            if records.iter().any(|filter| filter.matches(&record)) {
                self.delete_record(zone_id, require_id(&record)?).await?;
                deleted.push(record);
            }
        }
        Ok(deleted)
    }
}
