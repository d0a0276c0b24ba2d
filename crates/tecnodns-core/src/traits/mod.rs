//! Core traits for tecnodns
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`RecordGetter`], [`RecordAppender`], [`RecordSetter`], [`RecordDeleter`]:
//!   the four record capabilities
//! - [`RecordClient`]: all four at once

pub mod record_client;

pub use record_client::{RecordAppender, RecordClient, RecordDeleter, RecordGetter, RecordSetter};
