//! Resolver traits: the narrow capability handed to code that needs the container.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::registration::{AnyArc, Strategy};
use crate::types::TypeDescriptor;

/// Object-safe resolution capability.
///
/// Services that need to pull further dependencies at runtime can hold an
/// `Arc<dyn ResolverCore>` instead of a concrete [`Container`](crate::Container).
///
/// # Examples
///
/// ```
/// use autowire::{Container, Resolver, ResolverCore, Strategy};
/// use std::sync::Arc;
///
/// struct Plugin {
///     services: Arc<dyn ResolverCore>,
/// }
///
/// let container = Container::new();
/// let plugin = Plugin { services: Arc::new(container.clone()) };
///
/// plugin.services.register("port".into(), Strategy::value(8080u16), false);
/// assert!(container.has("port"));
/// assert_eq!(*container.get::<u16>("port").unwrap(), 8080);
/// ```
pub trait ResolverCore: Send + Sync {
    /// Resolves an identifier to a type-erased value.
    fn resolve(&self, id: &str) -> DiResult<AnyArc>;

    /// Whether an explicit binding exists for `id`.
    fn has(&self, id: &str) -> bool;

    /// Stores or replaces the binding for `id`.
    fn register(&self, id: Key, strategy: Strategy, singleton: bool);

    /// Introspects a type name through the container's type catalog.
    fn describe_type(&self, name: &str) -> Option<Arc<TypeDescriptor>>;
}

/// Typed resolution built on [`ResolverCore`].
///
/// # Examples
///
/// ```
/// use autowire::{Container, DiError, Resolver, Strategy};
///
/// let container = Container::new();
/// container.register("name", Strategy::value("autowire".to_string()), false);
///
/// let name = Resolver::get::<String>(&container, "name").unwrap();
/// assert_eq!(*name, "autowire");
///
/// assert!(matches!(Resolver::get::<u64>(&container, "name"), Err(DiError::TypeMismatch(_))));
/// assert!(Resolver::try_get::<String>(&container, "missing").unwrap().is_none());
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves `id` and downcasts to `T`.
    fn get<T: Send + Sync + 'static>(&self, id: &str) -> DiResult<Arc<T>> {
        self.resolve(id)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>().to_string()))
    }

    /// Like [`get`](Self::get), mapping "nothing known under `id`" to `None`.
    ///
    /// Only a `NotFound` for `id` itself is absorbed; failures further down the
    /// object graph are returned.
    fn try_get<T: Send + Sync + 'static>(&self, id: &str) -> DiResult<Option<Arc<T>>> {
        match self.get::<T>(id) {
            Ok(value) => Ok(Some(value)),
            Err(DiError::NotFound(missing)) if missing == id => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Resolves `id` as a trait object.
    ///
    /// Accepts values produced as `Arc<I>` by an interface factory, and concrete
    /// implementations when `id` names an interface in the type catalog.
    fn get_interface<I: ?Sized + Send + Sync + 'static>(&self, id: &str) -> DiResult<Arc<I>> {
        let value = self.resolve(id)?;
        if let Some(interface) = value.downcast_ref::<Arc<I>>() {
            return Ok(interface.clone());
        }
        self.describe_type(id)
            .filter(|descriptor| descriptor.is_interface())
            .map(|descriptor| descriptor.cast(value))
            .and_then(|cast| cast.downcast_ref::<Arc<I>>().cloned())
            .ok_or_else(|| DiError::TypeMismatch(std::any::type_name::<I>().to_string()))
    }

    /// Resolves `id` or panics.
    ///
    /// # Panics
    ///
    /// Panics with the resolution error. Meant for bootstrap code and tests.
    fn get_required<T: Send + Sync + 'static>(&self, id: &str) -> Arc<T> {
        self.get::<T>(id)
            .unwrap_or_else(|e| panic!("Failed to resolve required service `{}`: {}", id, e))
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}
