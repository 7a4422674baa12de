//! The data-source envelope contract.
//!
//! The framework core does not own a REST layer; it consumes *some* data
//! source through a narrow seam. Every operation resolves to the same
//! envelope shape — `{ success, data: { status, data, error } }` — and the
//! core never interprets the inner payload beyond that.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Transport-level data failure (the request never produced an envelope).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
	/// The transport failed outright.
	#[error("transport error: {0}")]
	Transport(String),
}

/// The wire response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
	/// Whether the request itself succeeded.
	pub success: bool,
	/// The inner body.
	pub data: EnvelopeBody,
}

/// The inner body of an [`Envelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeBody {
	/// Whether the operation succeeded.
	pub status: bool,
	/// Operation payload; opaque to the framework.
	#[serde(default)]
	pub data: Value,
	/// Error message when `status` is false.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl Envelope {
	/// A fully successful envelope wrapping `data`.
	pub fn ok(data: Value) -> Self {
		Self {
			success: true,
			data: EnvelopeBody {
				status: true,
				data,
				error: None,
			},
		}
	}

	/// A delivered-but-failed envelope carrying an error message.
	pub fn fail(error: impl Into<String>) -> Self {
		Self {
			success: true,
			data: EnvelopeBody {
				status: false,
				data: Value::Null,
				error: Some(error.into()),
			},
		}
	}

	/// Whether both layers report success.
	pub fn is_ok(&self) -> bool {
		self.success && self.data.status
	}

	/// The payload, when successful.
	pub fn payload(&self) -> Option<&Value> {
		self.is_ok().then_some(&self.data.data)
	}

	/// The error message, when failed.
	pub fn error_message(&self) -> Option<&str> {
		self.data.error.as_deref()
	}
}

/// Anything that behaves like a REST model endpoint.
///
/// Keys are opaque to the framework (an id, a path — whatever the source
/// uses).
pub trait DataSource {
	/// Fetches the record under `key`.
	fn fetch(&mut self, key: &str) -> Result<Envelope, DataError>;
	/// Saves `body` under `key`.
	fn save(&mut self, key: &str, body: &Value) -> Result<Envelope, DataError>;
	/// Deletes the record under `key`.
	fn destroy(&mut self, key: &str) -> Result<Envelope, DataError>;
}

/// In-memory data source for tests and demos.
#[derive(Debug, Default)]
pub struct MemorySource {
	records: HashMap<String, Value>,
}

impl MemorySource {
	/// Creates an empty source.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether no records are stored.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl DataSource for MemorySource {
	fn fetch(&mut self, key: &str) -> Result<Envelope, DataError> {
		Ok(match self.records.get(key) {
			Some(value) => Envelope::ok(value.clone()),
			None => Envelope::fail(format!("no record under `{key}`")),
		})
	}

	fn save(&mut self, key: &str, body: &Value) -> Result<Envelope, DataError> {
		self.records.insert(key.to_string(), body.clone());
		Ok(Envelope::ok(body.clone()))
	}

	fn destroy(&mut self, key: &str) -> Result<Envelope, DataError> {
		Ok(match self.records.remove(key) {
			Some(_) => Envelope::ok(Value::Null),
			None => Envelope::fail(format!("no record under `{key}`")),
		})
	}
}
