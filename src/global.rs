//! Process-wide shared container.
//!
//! Nothing in the resolution engine depends on this module. It exists for
//! applications that want one container reachable from anywhere; prefer
//! passing a [`Container`] (or an `Arc<dyn ResolverCore>`) explicitly.

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::container::Container;

// Created on first access.
static GLOBAL_CONTAINER: Lazy<RwLock<Container>> = Lazy::new(|| RwLock::new(Container::new()));

/// Handle to the shared container.
///
/// Every call returns a clone sharing the same bindings, until the shared
/// container is swapped with [`set_global`] or [`reset_global`].
///
/// # Examples
///
/// ```
/// use autowire::global;
///
/// global().register_value("app_name", "demo");
/// assert!(global().has("app_name"));
/// assert_eq!(*global().get::<&str>("app_name").unwrap(), "demo");
/// ```
pub fn global() -> Container {
    GLOBAL_CONTAINER.read().clone()
}

/// Installs `container` as the shared container, returning the previous one.
pub fn set_global(container: Container) -> Container {
    tracing::debug!("global container replaced");
    std::mem::replace(&mut *GLOBAL_CONTAINER.write(), container)
}

/// Replaces the shared container with a fresh default one.
pub fn reset_global() {
    set_global(Container::new());
}
