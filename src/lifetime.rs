//! Binding lifetime definitions.

/// Binding lifetimes controlling instance caching behavior
///
/// A binding is either cached after its first resolution or rebuilt on every
/// resolution. There is no scoped lifetime: a container has one cache.
///
/// # Examples
///
/// ```rust
/// use autowire::{Container, Lifetime, Strategy};
/// use std::sync::Arc;
///
/// struct Clock;
///
/// let container = Container::new();
/// container.register("clock", Strategy::factory(|_| Ok(Clock)), false);
/// container.register("shared_clock", Strategy::factory(|_| Ok(Clock)), true);
///
/// // Transient: a new instance every time
/// let a = container.resolve("clock").unwrap();
/// let b = container.resolve("clock").unwrap();
/// assert!(!Arc::ptr_eq(&a, &b));
///
/// // Singleton: computed once, then reused
/// let c = container.resolve("shared_clock").unwrap();
/// let d = container.resolve("shared_clock").unwrap();
/// assert!(Arc::ptr_eq(&c, &d));
///
/// assert_eq!(Lifetime::from(true), Lifetime::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifetime {
    /// Computed on first resolution, cached until the binding is replaced
    ///
    /// The cached value is returned by every later resolution of the same
    /// identifier, even when it looks empty (`None`, `0`, `""`).
    Singleton,
    /// Strategy invoked fresh on every resolution, never cached
    Transient,
}

impl Lifetime {
    /// Whether resolved values are memoized.
    pub fn is_cacheable(self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}

impl From<bool> for Lifetime {
    fn from(singleton: bool) -> Self {
        if singleton {
            Lifetime::Singleton
        } else {
            Lifetime::Transient
        }
    }
}
