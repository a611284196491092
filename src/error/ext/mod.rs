use super::{Error, Fields, chain::Chain};
use crate::stack::Stack;

/// Message of the root [`Error`] created when adding context to an empty [`Option`].
pub(crate) const NONE_MESSAGE: &str = "Option is None";

/// Extends the `Result` and `Option` types with methods for wrapping their
/// error (or absence of a value) into an [`Error`].
///
/// A value that is present passes through untouched.
///
/// # Examples
///
/// ```
/// use errstack::{ErrorContext, fields};
///
/// let result = "hello".parse::<i32>().context("parse integer");
/// assert_eq!("parse integer: invalid digit found in string", result.unwrap_err().to_string());
///
/// let result = None::<u8>.context_fields("lookup port", fields! { "service" => "dns" });
/// assert_eq!("lookup port: Option is None", result.unwrap_err().to_string());
/// ```
pub trait ErrorContext: sealed::SealedErrorContext {
    /// The resulting type after wrapping the contained error.
    type Context;

    /// Wrap the contained error with a message.
    fn context<M>(self, message: M) -> Self::Context
    where
        M: Into<String>;

    /// Lazily wrap the contained error with a message, if there is an error.
    fn with_context<M, F>(self, message: F) -> Self::Context
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Wrap the contained error with a message and contextual fields.
    fn context_fields<M>(self, message: M, fields: Fields) -> Self::Context
    where
        M: Into<String>;
}

impl<T, E> ErrorContext for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    type Context = Result<T, Error>;

    fn context<M>(self, message: M) -> Self::Context
    where
        M: Into<String>,
    {
        self.map_err(|error| error.wrap(message))
    }

    fn with_context<M, F>(self, message: F) -> Self::Context
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        self.map_err(|error| error.wrap(message()))
    }

    fn context_fields<M>(self, message: M, fields: Fields) -> Self::Context
    where
        M: Into<String>,
    {
        self.map_err(|error| error.wrap_with_fields(message, fields))
    }
}

impl<T> ErrorContext for Option<T> {
    type Context = Result<T, Error>;

    fn context<M>(self, message: M) -> Self::Context
    where
        M: Into<String>,
    {
        self.ok_or_else(|| Error::new(NONE_MESSAGE).wrap(message))
    }

    fn with_context<M, F>(self, message: F) -> Self::Context
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        self.ok_or_else(|| Error::new(NONE_MESSAGE).wrap(message()))
    }

    fn context_fields<M>(self, message: M, fields: Fields) -> Self::Context
    where
        M: Into<String>,
    {
        self.ok_or_else(|| Error::new(NONE_MESSAGE).wrap_with_fields(message, fields))
    }
}

/// Extends every error type with methods for wrapping it into an [`Error`]
/// and for walking or exporting its chain.
///
/// # Examples
///
/// ```
/// use errstack::{ErrorExt, fields};
///
/// #[derive(Debug)]
/// struct CustomError;
///
/// impl std::fmt::Display for CustomError {
///     fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
///         write!(f, "custom error")
///     }
/// }
///
/// impl std::error::Error for CustomError {}
///
/// let error = CustomError
///     .wrap("2")
///     .wrap_with_fields("3", fields! { "f1" => "v1" });
/// assert!(error.root_cause().downcast_ref::<CustomError>().is_some());
/// assert_eq!(
///     error.json_stack(),
///     br#"[{"fields":{"f1":"v1"},"message":"3"},{"message":"2"},{"message":"custom error"}]"#,
/// );
/// ```
pub trait ErrorExt: sealed::SealedErrorExt {
    /// Wrap the error with a message.
    fn wrap<M>(self, message: M) -> Error
    where
        M: Into<String>;

    /// Lazily wrap the error with a message.
    fn with_wrap<M, F>(self, message: F) -> Error
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Wrap the error with a message and contextual fields.
    fn wrap_with_fields<M>(self, message: M, fields: Fields) -> Error
    where
        M: Into<String>;

    /// Iterate over the chain of errors, starting with this one.
    fn chain(&self) -> Chain<'_>;

    /// Get the root cause of the error.
    fn root_cause(&self) -> &(dyn std::error::Error + 'static);

    /// Flatten the chain of errors into a [`Stack`].
    fn stack(&self) -> Stack;

    /// Flatten the chain of errors into its json encoded [`Stack`].
    fn json_stack(&self) -> Vec<u8> {
        self.stack().to_json()
    }
}

impl<E: std::error::Error + Send + Sync + 'static> ErrorExt for E {
    fn wrap<M>(self, message: M) -> Error
    where
        M: Into<String>,
    {
        Error::wrap_std(self, message.into(), None)
    }

    fn with_wrap<M, F>(self, message: F) -> Error
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        Error::wrap_std(self, message().into(), None)
    }

    fn wrap_with_fields<M>(self, message: M, fields: Fields) -> Error
    where
        M: Into<String>,
    {
        Error::wrap_std(self, message.into(), Some(fields))
    }

    fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        self.chain().next_back().unwrap_or(self)
    }

    fn stack(&self) -> Stack {
        Stack::from_error(self)
    }
}

mod sealed {
    pub trait SealedErrorContext {}

    impl<T, E> SealedErrorContext for Result<T, E> where E: std::error::Error + Send + Sync + 'static {}
    impl<T> SealedErrorContext for Option<T> {}

    pub trait SealedErrorExt {}

    impl<Error: std::error::Error + Send + Sync + 'static> SealedErrorExt for Error {}
}
