//! Failed-lookup values and the navigation result type.
//!
//! Every lookup in the model (`copy.get(..)`, `sheet.get(..)`, `row.get(..)`) is total: instead
//! of failing it returns a [`Lookup`], which is either the value found or a [`Sentinel`] carrying
//! the fully qualified path of the lookup that failed, e.g.
//! `COPY.content.1.foo [column does not exist in sheet]`.
//!
//! A sentinel absorbs any further navigation, so a chain such as
//! `copy.get("missing").get("x").get("y")` ends in the *first* failure's message. Templates can
//! render that message directly as a visible diagnostic.
//!
//! ```rust
//! use copytext::sentinel::Sentinel;
//! use copytext::Truthy;
//!
//! let err = Sentinel::new("COPY.foo [sheet does not exist]");
//! assert!(Sentinel::same(err.get("bing"), &err));
//! assert_eq!(err.len(), 1);
//! assert!(!err.is_truthy());
//! assert_eq!(err.to_string(), "COPY.foo [sheet does not exist]");
//! ```

use std::fmt;
use std::iter;
use std::sync::Arc;

/// Position or name used to index into a sheet (rows) or a row (cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'k> {
    /// Zero-based position. Negative positions are always out of range.
    Index(i64),
    /// Column name (rows) or `key`-column value (sheets).
    Name(&'k str),
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<i32> for Key<'_> {
    fn from(i: i32) -> Self {
        Key::Index(i64::from(i))
    }
}

impl From<i64> for Key<'_> {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<u32> for Key<'_> {
    fn from(i: u32) -> Self {
        Key::Index(i64::from(i))
    }
}

impl From<usize> for Key<'_> {
    fn from(i: usize) -> Self {
        Key::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl<'k> From<&'k str> for Key<'k> {
    fn from(name: &'k str) -> Self {
        Key::Name(name)
    }
}

impl<'k> From<&'k String> for Key<'k> {
    fn from(name: &'k String) -> Self {
        Key::Name(name.as_str())
    }
}

/// Resolve an index key against a collection length.
pub(crate) fn position(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

/// Explicit replacement for "falsy by content" checks in templates.
pub trait Truthy {
    /// Whether the value should count as present when a template tests it.
    fn is_truthy(&self) -> bool;
}

/// Text that can be emitted into rendered (HTML) output.
pub trait Render {
    /// Render-safe representation of the value.
    fn render(&self) -> String;
}

/// Terminal value standing in for a failed lookup.
///
/// Cloning shares the message allocation, so identity survives propagation through
/// [`Lookup`] chains (see [`Sentinel::same`]).
#[derive(Clone)]
pub struct Sentinel {
    message: Arc<str>,
}

impl Sentinel {
    /// Create a sentinel with a diagnostic message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Arc::from(message.into()),
        }
    }

    /// The diagnostic message describing the failed lookup.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Indexing a sentinel by anything returns the sentinel itself.
    pub fn get<'k>(&self, _key: impl Into<Key<'k>>) -> &Self {
        self
    }

    /// Yields the sentinel exactly once.
    pub fn iter(&self) -> iter::Once<&Self> {
        iter::once(self)
    }

    /// Always `1`.
    pub fn len(&self) -> usize {
        1
    }

    /// Always `false`; a sentinel is never empty (see [`Sentinel::len`]).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `a` and `b` are the same sentinel (not merely equal messages).
    pub fn same(a: &Sentinel, b: &Sentinel) -> bool {
        Arc::ptr_eq(&a.message, &b.message)
    }
}

impl fmt::Debug for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sentinel").field(&self.message).finish()
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<'a> IntoIterator for &'a Sentinel {
    type Item = &'a Sentinel;
    type IntoIter = iter::Once<&'a Sentinel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Truthy for Sentinel {
    fn is_truthy(&self) -> bool {
        false
    }
}

impl Render for Sentinel {
    fn render(&self) -> String {
        self.message.to_string()
    }
}

/// Result of a navigation step: the value found, or the sentinel for the failed lookup.
#[derive(Debug, Clone)]
pub enum Lookup<T> {
    /// The lookup succeeded.
    Found(T),
    /// The lookup (or an earlier one in the chain) failed.
    Missing(Sentinel),
}

impl<T> Lookup<T> {
    /// Shorthand for a fresh [`Lookup::Missing`].
    pub fn missing_with(message: impl Into<String>) -> Self {
        Lookup::Missing(Sentinel::new(message))
    }

    /// Whether the lookup succeeded.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Whether the lookup failed.
    pub fn is_missing(&self) -> bool {
        !self.is_found()
    }

    /// The found value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::Missing(_) => None,
        }
    }

    /// The sentinel, if the lookup failed.
    pub fn missing(&self) -> Option<&Sentinel> {
        match self {
            Lookup::Found(_) => None,
            Lookup::Missing(s) => Some(s),
        }
    }

    /// Borrow the found value.
    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Found(v) => Lookup::Found(v),
            Lookup::Missing(s) => Lookup::Missing(s.clone()),
        }
    }

    /// Transform the found value; a missing lookup passes through unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::Missing(s) => Lookup::Missing(s),
        }
    }

    /// Continue navigation from the found value; a missing lookup passes through unchanged.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Lookup<U>) -> Lookup<U> {
        match self {
            Lookup::Found(v) => f(v),
            Lookup::Missing(s) => Lookup::Missing(s),
        }
    }

    /// Recover from a failed lookup.
    pub fn or_else(self, f: impl FnOnce(Sentinel) -> Lookup<T>) -> Lookup<T> {
        match self {
            Lookup::Found(v) => Lookup::Found(v),
            Lookup::Missing(s) => f(s),
        }
    }

    /// Convert into a `Result`, with the sentinel as the error.
    pub fn into_result(self) -> Result<T, Sentinel> {
        match self {
            Lookup::Found(v) => Ok(v),
            Lookup::Missing(s) => Err(s),
        }
    }
}

impl<T: Truthy> Truthy for Lookup<T> {
    fn is_truthy(&self) -> bool {
        match self {
            Lookup::Found(v) => v.is_truthy(),
            Lookup::Missing(_) => false,
        }
    }
}

impl<T: Render> Render for Lookup<T> {
    fn render(&self) -> String {
        match self {
            Lookup::Found(v) => v.render(),
            Lookup::Missing(s) => s.render(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Lookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Found(v) => fmt::Display::fmt(v, f),
            Lookup::Missing(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_same_sentinel() {
        let err = Sentinel::new("foobar");
        assert!(Sentinel::same(err.get("bing"), &err));
        assert!(Sentinel::same(err.get(1), &err));
        assert_eq!(err.get("bing").to_string(), "foobar");
    }

    #[test]
    fn iteration_yields_itself_once() {
        let err = Sentinel::new("foobar");
        let mut it = err.iter();
        assert!(Sentinel::same(it.next().unwrap(), &err));
        assert!(it.next().is_none());

        // A fresh iteration starts over.
        assert_eq!((&err).into_iter().count(), 1);
    }

    #[test]
    fn sentinel_is_falsy_with_length_one() {
        let err = Sentinel::new("foobar");
        assert_eq!(err.len(), 1);
        assert!(!err.is_truthy());
        assert_eq!(err.render(), "foobar");
    }

    #[test]
    fn equal_messages_are_not_the_same_sentinel() {
        let a = Sentinel::new("x");
        let b = Sentinel::new("x");
        assert!(!Sentinel::same(&a, &b));
        assert!(Sentinel::same(&a, &a.clone()));
    }

    #[test]
    fn lookup_combinators_propagate_missing() {
        let missing: Lookup<i32> = Lookup::missing_with("COPY.a [sheet does not exist]");
        let sentinel = missing.missing().cloned().unwrap();

        let chained = missing.and_then(|v| Lookup::Found(v + 1)).map(|v| v * 2);
        assert!(Sentinel::same(chained.missing().unwrap(), &sentinel));

        let recovered = chained.or_else(|_| Lookup::Found(7));
        assert_eq!(recovered.found(), Some(7));

        let found: Lookup<i32> = Lookup::Found(1);
        assert_eq!(found.and_then(|v| Lookup::Found(v + 1)).into_result().unwrap(), 2);
    }

    #[test]
    fn negative_and_large_indexes_are_out_of_range() {
        assert_eq!(position(-1, 3), None);
        assert_eq!(position(3, 3), None);
        assert_eq!(position(2, 3), Some(2));
        assert_eq!(Key::from(usize::MAX), Key::Index(i64::MAX));
    }
}
