//! DNS record model shared by all providers
//!
//! Record names are relative to their zone; the apex is `"@"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// DNS record type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Mail exchange
    Mx,
    /// Name server
    Ns,
    /// Text
    Txt,
    /// Service locator
    Srv,
    /// Certification authority authorization
    Caa,
    /// Any other type, stored uppercase
    Other(String),
}

impl RecordType {
    /// The type as it appears on the wire and in zone files
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Ns => "NS",
            RecordType::Txt => "TXT",
            RecordType::Srv => "SRV",
            RecordType::Caa => "CAA",
            RecordType::Other(other) => other,
        }
    }

    /// True for the empty `Other("")` type, used as a wildcard when matching
    pub fn is_empty(&self) -> bool {
        matches!(self, RecordType::Other(t) if t.is_empty())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Ok(match upper.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            "CNAME" => RecordType::Cname,
            "MX" => RecordType::Mx,
            "NS" => RecordType::Ns,
            "TXT" => RecordType::Txt,
            "SRV" => RecordType::Srv,
            "CAA" => RecordType::Caa,
            _ => RecordType::Other(upper),
        })
    }
}

impl TryFrom<String> for RecordType {
    type Error = std::convert::Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

/// A DNS resource record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier (None until the record exists remotely)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Name relative to the zone ("@" for the apex)
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Record content (address, target, text, ...)
    pub data: String,

    /// Time-to-live; zero means "provider default"
    #[serde(default, with = "ttl_secs")]
    pub ttl: Duration,

    /// Priority for MX and SRV records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl Record {
    /// Create a new record without ID, TTL or priority
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            record_type,
            data: data.into(),
            ttl: Duration::ZERO,
            priority: None,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the provider ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether `self`, used as a deletion filter, selects `existing`.
    ///
    /// Name must always match, ignoring ASCII case. An empty type, empty
    /// data or zero TTL on the filter matches any value. A filter ID, when
    /// present, must match too.
    pub fn matches(&self, existing: &Record) -> bool {
        if let (Some(want), Some(have)) = (&self.id, &existing.id)
            && want != have
        {
            return false;
        }

        normalize_name(&self.name) == normalize_name(&existing.name)
            && (self.record_type.is_empty() || self.record_type == existing.record_type)
            && (self.data.is_empty() || self.data == existing.data)
            && (self.ttl.is_zero() || self.ttl == existing.ttl)
    }
}

fn normalize_name(name: &str) -> String {
    match name.trim_end_matches('.') {
        "" => "@".to_string(),
        other => other.to_ascii_lowercase(),
    }
}

/// Convert an absolute name to one relative to `zone`.
///
/// ```
/// use tecnodns_core::record::relative_name;
///
/// assert_eq!(relative_name("www.example.com.", "example.com."), "www");
/// assert_eq!(relative_name("example.com", "example.com."), "@");
/// ```
pub fn relative_name(fqdn: &str, zone: &str) -> String {
    let fqdn = fqdn.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');

    if fqdn.eq_ignore_ascii_case(zone) || fqdn.is_empty() {
        return "@".to_string();
    }

    let suffix = format!(".{}", zone);
    if let Some(split) = fqdn.len().checked_sub(suffix.len()).filter(|&i| i > 0)
        && fqdn.is_char_boundary(split)
        && fqdn[split..].eq_ignore_ascii_case(&suffix)
    {
        return fqdn[..split].to_string();
    }

    fqdn.to_string()
}

/// Convert a zone-relative name to an absolute, dot-terminated name.
pub fn absolute_name(name: &str, zone: &str) -> String {
    let zone = zone.trim_end_matches('.');
    match name {
        "" | "@" => format!("{}.", zone),
        n if n.ends_with('.') => n.to_string(),
        n => format!("{}.{}.", n, zone),
    }
}

mod ttl_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
