//! Hand-maintained type catalog.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::DiResult;
use crate::internal::HashMap;
use crate::key::Key;
use crate::registration::AnyArc;
use crate::types::{Arguments, Injectable, InterfaceCast, Parameter, TypeCatalog, TypeDescriptor, TypeKind};

/// A [`TypeCatalog`] populated by hand.
///
/// Concrete types describe themselves through [`Injectable`]; interfaces and
/// abstract types are declared by name. Adding a name again replaces the
/// previous description.
///
/// # Examples
///
/// ```rust
/// use autowire::{Arguments, DiResult, Injectable, TypeCatalog, TypeRegistry};
/// use std::sync::Arc;
///
/// trait Notifier: Send + Sync {}
///
/// struct Email;
/// impl Notifier for Email {}
///
/// impl Injectable for Email {
///     const NAME: &'static str = "Email";
///     fn construct(_args: Arguments) -> DiResult<Self> {
///         Ok(Email)
///     }
/// }
///
/// let types = TypeRegistry::new();
/// types
///     .add::<Email>()
///     .add_interface("Notifier")
///     .implement::<dyn Notifier, Email>("Notifier", |email| email as Arc<dyn Notifier>);
///
/// assert!(types.describe("Email").unwrap().is_instantiable());
/// assert!(types.describe("Notifier").unwrap().is_interface());
/// assert!(types.describe("Sms").is_none());
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<Key, Arc<TypeDescriptor>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a concrete type that constructs itself.
    pub fn add<T: Injectable>(&self) -> &Self {
        let constructor = Arc::new(|args: Arguments| T::construct(args).map(|v| Arc::new(v) as AnyArc));
        self.insert(TypeDescriptor::new(
            T::NAME,
            TypeKind::Concrete {
                parameters: T::parameters(),
                constructor,
            },
        ))
    }

    /// Adds a concrete type from an explicit parameter list and constructor.
    pub fn add_with<T, F>(&self, name: impl Into<Key>, parameters: Vec<Parameter>, constructor: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Fn(Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        let constructor = Arc::new(move |args: Arguments| constructor(args).map(|v| Arc::new(v) as AnyArc));
        self.insert(TypeDescriptor::new(name, TypeKind::Concrete { parameters, constructor }))
    }

    /// Declares a type that exists but cannot be instantiated.
    pub fn add_abstract(&self, name: impl Into<Key>) -> &Self {
        self.insert(TypeDescriptor::new(name, TypeKind::Abstract))
    }

    /// Declares an interface. Previously registered implementations are kept.
    pub fn add_interface(&self, name: impl Into<Key>) -> &Self {
        let name = name.into();
        let mut types = self.types.write();
        let implementations = match types.get(&name).map(|d| d.kind().clone()) {
            Some(TypeKind::Interface { implementations }) => implementations,
            _ => Vec::new(),
        };
        tracing::trace!(type_name = %name, "type described");
        types.insert(
            name.clone(),
            Arc::new(TypeDescriptor::new(name, TypeKind::Interface { implementations })),
        );
        drop(types);
        self
    }

    /// Records that `T` implements interface `I`, declaring the interface if needed.
    ///
    /// `cast` performs the unsizing coercion, typically `|t| t as Arc<dyn I>`.
    /// A concrete or abstract description under the same name is replaced.
    pub fn implement<I, T>(&self, interface: impl Into<Key>, cast: fn(Arc<T>) -> Arc<I>) -> &Self
    where
        I: ?Sized + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let interface = interface.into();
        let implementation: InterfaceCast = Arc::new(move |value: &AnyArc| {
            value
                .clone()
                .downcast::<T>()
                .ok()
                .map(|concrete| Arc::new(cast(concrete)) as AnyArc)
        });

        let mut types = self.types.write();
        let mut implementations = match types.get(&interface).map(|d| d.kind().clone()) {
            Some(TypeKind::Interface { implementations }) => implementations,
            Some(_) => {
                tracing::debug!(interface = %interface, "replacing non-interface description with an interface");
                Vec::new()
            }
            None => Vec::new(),
        };
        implementations.push(implementation);
        tracing::trace!(interface = %interface, implementation = std::any::type_name::<T>(), "interface implementation added");
        types.insert(
            interface.clone(),
            Arc::new(TypeDescriptor::new(interface, TypeKind::Interface { implementations })),
        );
        drop(types);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// Known type names, sorted.
    pub fn names(&self) -> Vec<Key> {
        let mut names: Vec<Key> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    fn insert(&self, descriptor: TypeDescriptor) -> &Self {
        tracing::trace!(type_name = %descriptor.name(), "type described");
        self.types.write().insert(descriptor.name().clone(), Arc::new(descriptor));
        self
    }
}

impl TypeCatalog for TypeRegistry {
    fn describe(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.read().get(name).cloned()
    }
}
