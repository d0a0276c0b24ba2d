// # Record Client Traits
//
// Defines the four record-management capabilities a DNS provider exposes.
//
// ## Implementations
//
// - Tecnocrática: `tecnodns-provider-tecnocratica` crate
//
// ## Usage
//
// ```rust,ignore
// use tecnodns_core::traits::RecordGetter;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let client = /* RecordClient implementation */;
//
//     for record in client.get_records("example.com.").await? {
//         println!("{} {} {}", record.name, record.record_type, record.data);
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::Result;
use crate::record::Record;

/// Lists the records of a zone
#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// Get all records in `zone`
    ///
    /// Returned names are relative to the zone.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>>;
}

/// Creates records in a zone
#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Create every record in `records`
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: The records that were created, as stored remotely
    /// - `Err(Error)`: If any creation failed
    async fn append_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>>;
}

/// Replaces records in a zone
#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Make the zone's records for each `(name, type)` pair in `records`
    /// equal to the given ones
    ///
    /// Existing records of a pair are updated in place, missing ones are
    /// created and surplus ones are deleted. Records with other name/type
    /// pairs are left untouched.
    async fn set_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>>;
}

/// Deletes records from a zone
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Delete every existing record selected by one of `records`
    ///
    /// See [`Record::matches`] for the selection rules.
    ///
    /// # Returns
    ///
    /// The records that were actually deleted.
    async fn delete_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>>;
}

/// A client implementing all four record capabilities
///
/// # Trust Level: Untrusted
///
/// Record clients perform HTTP calls to their provider's endpoints only.
/// They never retry, cache, or spawn tasks; callers own those decisions.
pub trait RecordClient: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {}

impl<T> RecordClient for T where T: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {}
