//! Walking an error chain, native and foreign links alike.
//!
//! Every [`std::error::Error`] exposing a [`source`](StdError::source)
//! takes part in the chain, whether or not it was built by this crate.

use self::ChainState::{Buffered, Linked};
use std::error::Error as StdError;

/// Iterator over an error and its chain of sources, outermost first.
///
/// This type is the iterator returned by [`ErrorExt::chain`].
///
/// [`ErrorExt::chain`]: super::ErrorExt::chain
///
/// # Example
///
/// ```
/// use errstack::ErrorExt;
/// use std::io;
///
/// let error = io::Error::other("disk on fire").wrap("write file").wrap("save");
/// let messages: Vec<_> = error.chain().map(|e| e.to_string()).collect();
/// assert_eq!(
///     messages,
///     ["save: write file: disk on fire", "write file: disk on fire", "disk on fire"],
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    state: ChainState<'a>,
}

#[derive(Debug, Clone)]
enum ChainState<'a> {
    Linked {
        next: Option<&'a (dyn StdError + 'static)>,
    },
    Buffered {
        rest: std::vec::IntoIter<&'a (dyn StdError + 'static)>,
    },
}

impl<'a> Chain<'a> {
    /// Create a [`Chain`] starting at (and including) `head`.
    pub fn new(head: &'a (dyn StdError + 'static)) -> Self {
        Self {
            state: ChainState::Linked { next: Some(head) },
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            Linked { next } => {
                let error = (*next)?;
                *next = error.source();
                Some(error)
            }
            Buffered { rest } => rest.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Chain<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            Linked { next } => {
                let mut next = *next;
                let mut rest = Vec::new();
                while let Some(cause) = next {
                    next = cause.source();
                    rest.push(cause);
                }
                let mut rest = rest.into_iter();
                let last = rest.next_back();
                self.state = Buffered { rest };
                last
            }
            Buffered { rest } => rest.next_back(),
        }
    }
}

impl ExactSizeIterator for Chain<'_> {
    fn len(&self) -> usize {
        match &self.state {
            Linked { next } => {
                let mut next = *next;
                let mut len = 0;
                while let Some(cause) = next {
                    next = cause.source();
                    len += 1;
                }
                len
            }
            Buffered { rest } => rest.len(),
        }
    }
}

/// Returns the immediate cause of `error`, if any.
pub fn cause<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    error.source()
}

/// Reports whether any error in the chain of `error` equals `target`.
///
/// ```
/// use errstack::{Error, ErrorExt, chain};
///
/// let not_found = Error::new("not found");
/// let error = not_found.clone().wrap("load user");
///
/// assert!(chain::is(&error, &not_found));
/// assert!(!chain::is(&error, &Error::new("forbidden")));
/// ```
pub fn is<T>(error: &(dyn StdError + 'static), target: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    Chain::new(error).any(|link| link.downcast_ref::<T>() == Some(target))
}

/// Finds the first error in the chain of `error` of type `T`.
///
/// ```
/// use errstack::{ErrorExt, chain};
/// use std::io;
///
/// let error = io::Error::new(io::ErrorKind::NotFound, "gone").wrap("open config");
/// let io_error = chain::find::<io::Error>(&error).unwrap();
/// assert_eq!(io_error.kind(), io::ErrorKind::NotFound);
/// ```
pub fn find<'a, T>(error: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    Chain::new(error).find_map(|link| link.downcast_ref::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorExt};
    use std::{fmt, io};

    #[derive(Debug, PartialEq)]
    struct Sentinel(u8);

    impl fmt::Display for Sentinel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sentinel {}", self.0)
        }
    }

    impl StdError for Sentinel {}

    #[test]
    fn chain_len_and_order() {
        let error = Sentinel(1).wrap("a").wrap("b");
        let chain = Chain::new(&error);
        assert_eq!(chain.len(), 3);

        let messages: Vec<_> = chain.map(|e| e.to_string()).collect();
        assert_eq!(messages, ["b: a: sentinel 1", "a: sentinel 1", "sentinel 1"]);
    }

    #[test]
    fn chain_back_is_root() {
        let error = Sentinel(7).wrap("a").wrap("b");
        let mut chain = Chain::new(&error);
        let root = chain.next_back().unwrap();
        assert!(root.is::<Sentinel>());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.next().unwrap().to_string(), "b: a: sentinel 7");
    }

    #[test]
    fn cause_of_root_is_none() {
        let error = Error::new("root");
        assert!(cause(&error).is_none());

        let error = error.wrap("top");
        assert_eq!(cause(&error).unwrap().to_string(), "root");
    }

    #[test]
    fn is_matches_foreign_sentinel() {
        let error = Sentinel(3).wrap("a").wrap("b");
        assert!(is(&error, &Sentinel(3)));
        assert!(!is(&error, &Sentinel(4)));
    }

    #[test]
    fn find_binds_first_match() {
        let error = io::Error::other("io").wrap("a");
        assert!(find::<io::Error>(&error).is_some());
        assert!(find::<Sentinel>(&error).is_none());

        let found = find::<Error>(&error).unwrap();
        assert_eq!(found.message(), "a");
    }

    fn first_io_error(error: &Error) -> Option<&io::Error> {
        find(error)
    }

    #[test]
    fn find_borrows_from_the_chain() {
        let error = io::Error::new(io::ErrorKind::NotFound, "gone")
            .wrap("open config")
            .wrap("load");
        let found = first_io_error(&error).unwrap();
        assert_eq!(found.kind(), io::ErrorKind::NotFound);
        assert_eq!(found.to_string(), "gone");
    }
}
