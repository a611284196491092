//! Flattening an error chain into a [`Stack`] of [`Record`]s,
//! encoding it as json, and restoring an equivalent chain from either.
//!
//! The json form of a stack is an array of objects, outermost error first:
//!
//! ```json
//! [
//!   {"fields": {"f1": "v1"}, "message": "3"},
//!   {"message": "2"},
//!   {"message": "1"}
//! ]
//! ```
//!
//! Restoring always produces native [`Error`] nodes. Links that were foreign
//! errors come back as nodes carrying only their rendered message.
//!
//! ```
//! use errstack::{Error, ErrorExt, fields, restore_raw};
//!
//! let error = Error::with_fields("1", fields! { "f1" => "v1" })
//!     .wrap_with_fields("2", fields! { "f2" => "v2" });
//!
//! let json = error.json_stack();
//! assert_eq!(
//!     json,
//!     br#"[{"fields":{"f2":"v2"},"message":"2"},{"fields":{"f1":"v1"},"message":"1"}]"#,
//! );
//!
//! let restored = restore_raw(&json).unwrap();
//! assert_eq!(restored.to_string(), "2: 1");
//! assert_eq!(restored, error);
//! ```

use crate::{Error, error::chain::Chain};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;

mod record;
pub use record::{FIELDS_KEY, MESSAGE_KEY, Record};

/// The flattened chain of an error: one [`Record`] per link,
/// outermost first and root cause last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack {
    records: Vec<Record>,
}

impl Stack {
    /// Create an empty [`Stack`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the chain of `error`, native and foreign links alike.
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let stack: Self = Chain::new(error).map(Record::from_link).collect();
        tracing::trace!("flattened error chain into {} records", stack.len());
        stack
    }

    /// Leniently decode a json encoded [`Stack`].
    ///
    /// Input that is not a json array decodes as an empty stack,
    /// entries that are not objects are dropped.
    /// See [`Record`] for how the members of an entry are read.
    pub fn from_json(bytes: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("discard undecodable error stack: {err}");
                return Self::default();
            }
        };

        match value {
            Value::Array(items) => items.into_iter().filter_map(Record::from_value).collect(),
            other => {
                tracing::debug!("discard error stack: expected a json array, got: {other}");
                Self::default()
            }
        }
    }

    /// Encode the [`Stack`] as compact json.
    ///
    /// Encoding is best effort: on failure the result is empty.
    pub fn to_json(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|err| {
            tracing::debug!("failed to encode error stack: {err}");
            Vec::new()
        })
    }

    /// Rebuild a native chain from this stack, `None` if it is empty.
    pub fn restore(self) -> Option<Error> {
        restore(self)
    }

    /// The records of the stack, outermost first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over the records, outermost first.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of links in the flattened chain.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the stack has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the stack into its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for Stack {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Stack {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Stack {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Flatten the chain of an optional error, `None` gives an empty [`Stack`].
pub fn stack(error: Option<&(dyn StdError + 'static)>) -> Stack {
    error.map(Stack::from_error).unwrap_or_default()
}

/// Flatten the chain of an optional error and encode it as json.
///
/// `None` encodes as `[]`.
pub fn json_stack(error: Option<&(dyn StdError + 'static)>) -> Vec<u8> {
    stack(error).to_json()
}

/// Rebuild a native chain from records ordered outermost first.
///
/// The last record becomes the root, every record before it wraps the one
/// after it. No records means no error.
pub fn restore<I>(records: I) -> Option<Error>
where
    I: IntoIterator<Item = Record>,
    I::IntoIter: DoubleEndedIterator,
{
    records.into_iter().rev().fold(None, |cause, record| {
        let (message, fields) = record.into_parts();
        Some(Error::restored(message, fields, cause))
    })
}

/// Rebuild a native chain from a json encoded [`Stack`].
///
/// Never fails: malformed input degrades to `None` or to the part of the
/// chain that could be read.
pub fn restore_raw(bytes: &[u8]) -> Option<Error> {
    Stack::from_json(bytes).restore()
}
