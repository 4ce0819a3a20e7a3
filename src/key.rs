//! Identifier keys for bindings and types.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::types::Injectable;

/// Key for binding storage and lookup.
///
/// An identifier is an arbitrary string: a service name such as `"mailer"`,
/// an interface name, or a type name known to the container's type catalog.
/// Keys are cheap to clone and borrow as `&str`, so maps keyed by `Key`
/// can be queried with plain string slices.
///
/// # Examples
///
/// ```rust
/// use autowire::Key;
///
/// let a = Key::from("service");
/// let b: Key = String::from("service").into();
///
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "service");
/// assert_eq!(a.to_string(), "service");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Arc<str>);

impl Key {
    /// Creates a key from anything string-like.
    pub fn new(id: impl AsRef<str>) -> Self {
        Key(Arc::from(id.as_ref()))
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?})", &*self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(id: &str) -> Self {
        Key(Arc::from(id))
    }
}

impl From<String> for Key {
    fn from(id: String) -> Self {
        Key(Arc::from(id))
    }
}

impl From<&String> for Key {
    fn from(id: &String) -> Self {
        Key(Arc::from(id.as_str()))
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// Key under which an [`Injectable`] type is described.
#[inline]
pub fn key_of_type<T: Injectable>() -> Key {
    Key::from(T::NAME)
}
