//! Binding descriptors for introspection and diagnostics.

use crate::key::Key;
use crate::lifetime::Lifetime;

/// Which construction strategy a binding uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    Factory,
    TypeName,
    Literal,
}

/// Binding descriptor for introspection and diagnostics
///
/// A point-in-time view of one registry entry, useful for startup checks
/// and for dumping what a container knows about.
///
/// # Examples
///
/// ```rust
/// use autowire::{Container, Lifetime, Strategy, StrategyKind};
///
/// struct Mailer;
///
/// let container = Container::new();
/// container.singleton("mailer", Strategy::factory(|_| Ok(Mailer)));
/// container.register("greeting", Strategy::value("hi"), false);
///
/// let descriptors = container.descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// // Sorted by identifier
/// assert_eq!(descriptors[0].identifier(), "greeting");
/// assert_eq!(descriptors[0].strategy, StrategyKind::Literal);
///
/// let mailer = &descriptors[1];
/// assert_eq!(mailer.lifetime, Lifetime::Singleton);
/// assert!(!mailer.cached);
///
/// container.resolve("mailer").unwrap();
/// assert!(container.descriptors()[1].cached);
/// ```
#[derive(Debug, Clone)]
pub struct BindingDescriptor {
    /// The identifier the binding is registered under
    pub key: Key,
    /// Binding lifetime
    pub lifetime: Lifetime,
    /// Construction strategy
    pub strategy: StrategyKind,
    /// Type name auto-wired by a `TypeName` strategy
    pub target: Option<Key>,
    /// Whether a singleton value has been computed and cached
    pub cached: bool,
}

impl BindingDescriptor {
    pub fn identifier(&self) -> &str {
        self.key.as_str()
    }

    pub fn is_singleton(&self) -> bool {
        self.lifetime.is_cacheable()
    }
}
