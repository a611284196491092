use crate::{Error, Fields};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::error::Error as StdError;

/// Key of the message of a [`Record`] in its json object.
pub const MESSAGE_KEY: &str = "message";

/// Key of the fields of a [`Record`] in its json object.
pub const FIELDS_KEY: &str = "fields";

/// One flattened link of an error chain: its own message and,
/// only when it has any, its contextual fields.
///
/// Encoded as a json object, `"fields"` is left out when there are none:
///
/// ```
/// use errstack::{Record, fields};
///
/// let record = Record::new("boom");
/// assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"message":"boom"}"#);
///
/// let record = Record::with_fields("boom", fields! { "f1" => "v1" });
/// assert_eq!(
///     serde_json::to_string(&record).unwrap(),
///     r#"{"fields":{"f1":"v1"},"message":"boom"}"#,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(
        default,
        deserialize_with = "non_empty_fields",
        skip_serializing_if = "Option::is_none"
    )]
    fields: Option<Fields>,
    message: String,
}

impl Record {
    /// Create a [`Record`] with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            fields: None,
            message: message.into(),
        }
    }

    /// Create a [`Record`] with a message and fields.
    ///
    /// Empty fields are dropped.
    pub fn with_fields(message: impl Into<String>, fields: Fields) -> Self {
        Self {
            fields: Some(fields).filter(|fields| !fields.is_empty()),
            message: message.into(),
        }
    }

    /// The message of the link.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The fields of the link, if any.
    pub fn fields(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    /// Consume the record into its message and fields.
    pub fn into_parts(self) -> (String, Option<Fields>) {
        (self.message, self.fields)
    }

    /// Flatten a single link of a chain.
    ///
    /// Native nodes keep their own message and fields,
    /// any other error is reduced to its rendered message.
    pub(crate) fn from_link(link: &(dyn StdError + 'static)) -> Self {
        match link.downcast_ref::<Error>() {
            Some(node) => Self::from(node),
            None => Self::new(link.to_string()),
        }
    }

    /// Leniently read a [`Record`] from a json value.
    ///
    /// Anything but an object is rejected. A `message` that is not a string
    /// reads as empty, `fields` that are not an object are dropped.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                tracing::debug!("drop error stack entry: not a json object: {other}");
                return None;
            }
        };

        let message = match object.remove(MESSAGE_KEY) {
            Some(Value::String(message)) => message,
            None => String::new(),
            Some(other) => {
                tracing::debug!("error stack entry has a non-string message: {other}");
                String::new()
            }
        };

        let fields = match object.remove(FIELDS_KEY) {
            Some(Value::Object(fields)) => Some(fields),
            None => None,
            Some(other) => {
                tracing::debug!("drop error stack entry fields: not a json object: {other}");
                None
            }
        };

        Some(match fields {
            Some(fields) => Self::with_fields(message, fields),
            None => Self::new(message),
        })
    }
}

fn non_empty_fields<'de, D>(deserializer: D) -> Result<Option<Fields>, D::Error>
where
    D: Deserializer<'de>,
{
    let fields = Option::<Fields>::deserialize(deserializer)?;
    Ok(fields.filter(|fields| !fields.is_empty()))
}

impl From<&Error> for Record {
    fn from(node: &Error) -> Self {
        Self {
            fields: node.fields().cloned(),
            message: node.message().to_owned(),
        }
    }
}
