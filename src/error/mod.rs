//! The [`Error`] node and the ways to build a chain out of it.
//!
//! An [`Error`] carries a message, optional context [`Fields`] and
//! an optional cause. The cause can be another [`Error`] or any other
//! [`std::error::Error`], which is traversed through its
//! [`source`](std::error::Error::source).
//!
//! Rendering an [`Error`] with [`Display`](fmt::Display) joins the messages
//! of the whole chain with `": "`, outermost first:
//!
//! ```
//! use errstack::{Error, ErrorExt, fields};
//!
//! let error = Error::with_fields("first message", fields! { "f1" => "v1" })
//!     .wrap("second msg")
//!     .wrap("third message");
//! assert_eq!(error.to_string(), "third message: second msg: first message");
//! ```

use std::{any::Any, error::Error as StdError, fmt, sync::Arc};

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Contextual key/value fields attached to an [`Error`].
///
/// Values can be anything json can represent.
/// Use the [`fields!`](crate::fields!) macro to build them inline.
pub type Fields = serde_json::Map<String, serde_json::Value>;

pub mod chain;

mod ext;
pub use ext::{ErrorContext, ErrorExt};

mod macros;

/// An immutable error node: a message, optional context fields and an
/// optional cause.
///
/// Cloning is cheap, the node is shared.
#[derive(Clone)]
pub struct Error {
    inner: Arc<Inner>,
}

struct Inner {
    message: String,
    fields: Option<Fields>,
    cause: Option<Cause>,
}

#[derive(Clone)]
enum Cause {
    Native(Error),
    Foreign(Arc<dyn StdError + Send + Sync>),
}

impl Cause {
    fn from_std<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        if let Some(node) = (&error as &dyn Any).downcast_ref::<Error>() {
            return Self::Native(node.clone());
        }
        Self::Foreign(Arc::new(error))
    }

    fn from_boxed(error: BoxError) -> Self {
        match error.downcast::<Error>() {
            Ok(node) => Self::Native(*node),
            Err(error) => Self::Foreign(Arc::from(error)),
        }
    }

    fn as_std(&self) -> &(dyn StdError + Send + Sync + 'static) {
        match self {
            Self::Native(node) => node,
            Self::Foreign(error) => error.as_ref(),
        }
    }
}

impl Error {
    /// Create a new root [`Error`] without fields.
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, None)
    }

    /// Create a new root [`Error`] with contextual fields.
    ///
    /// An empty field map is the same as no fields at all.
    pub fn with_fields(message: impl Into<String>, fields: Fields) -> Self {
        Self::build(message.into(), Some(fields), None)
    }

    /// Wrap a type-erased error into a new [`Error`].
    pub fn wrap_boxed(error: BoxError, message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Some(Cause::from_boxed(error)))
    }

    pub(crate) fn wrap_std<E>(error: E, message: String, fields: Option<Fields>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::build(message, fields, Some(Cause::from_std(error)))
    }

    pub(crate) fn restored(message: String, fields: Option<Fields>, cause: Option<Self>) -> Self {
        Self::build(message, fields, cause.map(Cause::Native))
    }

    fn build(message: String, fields: Option<Fields>, cause: Option<Cause>) -> Self {
        Self {
            inner: Arc::new(Inner {
                message,
                fields: fields.filter(|fields| !fields.is_empty()),
                cause,
            }),
        }
    }

    /// The message of this node only, without those of its causes.
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// The contextual fields of this node, if it has any.
    pub fn fields(&self) -> Option<&Fields> {
        self.inner.fields.as_ref()
    }

    /// The immediate cause of this node, `None` for a root.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.inner.cause.as_ref().map(Cause::as_std)
    }
}

/// Wrap an optional error with an explanatory message.
///
/// Wrapping nothing gives nothing:
///
/// ```
/// use errstack::{Error, wrap};
///
/// assert!(wrap(None::<Error>, "context").is_none());
///
/// let error = wrap(Some(Error::new("root")), "context").unwrap();
/// assert_eq!(error.to_string(), "context: root");
/// ```
pub fn wrap<E>(cause: Option<E>, message: impl Into<String>) -> Option<Error>
where
    E: StdError + Send + Sync + 'static,
{
    cause.map(|error| Error::wrap_std(error, message.into(), None))
}

/// Wrap an optional error with an explanatory message and contextual fields.
///
/// Same as [`wrap`], `None` stays `None`.
pub fn wrap_with_fields<E>(
    cause: Option<E>,
    message: impl Into<String>,
    fields: Fields,
) -> Option<Error>
where
    E: StdError + Send + Sync + 'static,
{
    cause.map(|error| Error::wrap_std(error, message.into(), Some(fields)))
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)?;

        let mut next = self.inner.cause.as_ref();
        while let Some(cause) = next {
            f.write_str(": ")?;
            next = match cause {
                Cause::Native(node) => {
                    f.write_str(&node.inner.message)?;
                    node.inner.cause.as_ref()
                }
                // a foreign error renders its own sources
                Cause::Foreign(error) => {
                    fmt::Display::fmt(error, f)?;
                    None
                }
            };
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("message", &self.inner.message)
            .field("fields", &self.inner.fields)
            .field("cause", &self.cause())
            .finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause().map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Two nodes are equal when their messages and fields are equal all the way
/// down the native part of the chain, and any foreign cause is the very same
/// shared error.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            if Arc::ptr_eq(&a.inner, &b.inner) {
                return true;
            }
            if a.inner.message != b.inner.message || a.inner.fields != b.inner.fields {
                return false;
            }
            match (&a.inner.cause, &b.inner.cause) {
                (None, None) => return true,
                (Some(Cause::Native(x)), Some(Cause::Native(y))) => {
                    a = x;
                    b = y;
                }
                (Some(Cause::Foreign(x)), Some(Cause::Foreign(y))) => return Arc::ptr_eq(x, y),
                _ => return false,
            }
        }
    }
}

impl Eq for Error {}

impl Drop for Inner {
    // unroll the drop of long native chains
    fn drop(&mut self) {
        let mut next = self.cause.take();
        while let Some(cause) = next.take() {
            next = match cause {
                Cause::Native(node) => {
                    Arc::into_inner(node.inner).and_then(|mut inner| inner.cause.take())
                }
                Cause::Foreign(_) => None,
            };
        }
    }
}
