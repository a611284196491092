//! Error chains with structured context, that survive a trip through json.
//!
//! An [`Error`] is an immutable node holding a message, optional
//! key/value context [`Fields`] and an optional cause. The cause can be
//! another [`Error`] or any other [`std::error::Error`]; foreign errors take
//! part in the chain through their [`source`](std::error::Error::source).
//!
//! | operation | function |
//! |-|-|
//! | build a root | [`Error::new`], [`Error::with_fields`] |
//! | wrap a cause | [`wrap`], [`wrap_with_fields`], [`ErrorExt::wrap`], [`ErrorContext::context`] |
//! | flatten a chain | [`stack()`], [`ErrorExt::stack`] |
//! | encode as json | [`json_stack`], [`ErrorExt::json_stack`], [`Stack::to_json`] |
//! | restore a chain | [`restore`], [`restore_raw`], [`Stack::restore`] |
//! | inspect a chain | [`chain::cause`], [`chain::is`], [`chain::find`], [`ErrorExt::chain`] |
//!
//! # Rendering
//!
//! The [`Display`](std::fmt::Display) of an [`Error`] is the messages of its
//! whole chain joined with `": "`, outermost first. [`Error::message`] gives
//! the message of a single node.
//!
//! # Example
//!
//! ```
//! use errstack::{Error, ErrorExt, Record, fields, restore_raw};
//! use std::io;
//!
//! let error = io::Error::other("connection reset")
//!     .wrap("read response")
//!     .wrap_with_fields("fetch user", fields! { "user_id" => 42 });
//! assert_eq!(error.to_string(), "fetch user: read response: connection reset");
//!
//! let stack = error.stack();
//! assert_eq!(
//!     stack.records(),
//!     [
//!         Record::with_fields("fetch user", fields! { "user_id" => 42 }),
//!         Record::new("read response"),
//!         Record::new("connection reset"),
//!     ],
//! );
//!
//! // the io error comes back as a native node with its rendered message
//! let restored = restore_raw(&stack.to_json()).unwrap();
//! assert_eq!(restored.to_string(), error.to_string());
//! assert!(restored.root_cause().is::<Error>());
//! ```
//!
//! # Crate features
//!
//! - `preserve_order`: keep [`Fields`] in insertion order rather than sorted by key.

pub mod error;
#[doc(inline)]
pub use error::{BoxError, Error, ErrorContext, ErrorExt, Fields, chain, wrap, wrap_with_fields};

pub mod stack;
#[doc(inline)]
pub use stack::{Record, Stack, json_stack, restore, restore_raw, stack};

pub use serde_json::Value;
