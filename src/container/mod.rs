//! The dependency injection container.
//!
//! A [`Container`] owns the binding registry, the singleton caches and a
//! handle to the type catalog used for auto-wiring. It is cheap to clone:
//! clones share the same bindings.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ContainerConfig;
use crate::descriptors::BindingDescriptor;
use crate::error::DiResult;
use crate::internal::DepthGuard;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::observer::{DiObserver, Observers, TracingObserver};
use crate::registration::{AnyArc, Binding, Registry, Strategy};
use crate::traits::{Resolver, ResolverCore};
use crate::types::{TypeCatalog, TypeDescriptor, TypeRegistry};

mod autowire;

/// String-keyed dependency injection container.
///
/// Identifiers resolve through an explicit binding when one exists, and are
/// otherwise built by auto-wiring: the identifier is looked up as a type in
/// the [`TypeCatalog`] and its constructor parameters are resolved recursively.
///
/// # Thread Safety
///
/// `Container` is `Send + Sync`. Registration may happen at any time,
/// including from inside a factory. A singleton's factory runs at most once
/// even when several threads resolve it for the first time together.
///
/// # Examples
///
/// ```
/// use autowire::{Arguments, Container, DiResult, Injectable, Parameter, TypeRegistry};
/// use std::sync::Arc;
///
/// struct Orm;
/// impl Injectable for Orm {
///     const NAME: &'static str = "ORM";
///     fn construct(_args: Arguments) -> DiResult<Self> {
///         Ok(Orm)
///     }
/// }
///
/// struct User {
///     orm: Arc<Orm>,
/// }
/// impl Injectable for User {
///     const NAME: &'static str = "User";
///     fn parameters() -> Vec<Parameter> {
///         vec![Parameter::of::<Orm>("orm")]
///     }
///     fn construct(args: Arguments) -> DiResult<Self> {
///         Ok(User { orm: args.get(0)? })
///     }
/// }
///
/// let types = Arc::new(TypeRegistry::new());
/// types.add::<Orm>().add::<User>();
///
/// let container = Container::with_types(types);
///
/// // Neither type is registered: both are auto-wired
/// let user = container.get::<User>("User").unwrap();
/// let _orm: &Orm = &user.orm;
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registry: Registry,
    types: Arc<dyn TypeCatalog>,
    config: ContainerConfig,
    observers: Observers,
}

impl Container {
    /// Creates a container with default configuration and an empty [`TypeRegistry`].
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a container that auto-wires through `types`.
    pub fn with_types<C: TypeCatalog + 'static>(types: Arc<C>) -> Self {
        Self::builder().types(types).build()
    }

    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    pub fn types(&self) -> &Arc<dyn TypeCatalog> {
        &self.inner.types
    }

    // ----- Registration -----

    /// Stores the binding for `id`, replacing any previous one.
    ///
    /// With `singleton` set the first resolved value is cached; replacing a
    /// binding discards its cached value.
    pub fn register(&self, id: impl Into<Key>, strategy: Strategy, singleton: bool) -> &Self {
        let key = id.into();
        let lifetime = Lifetime::from(singleton);
        let kind = strategy.kind();
        let replaced = self.inner.registry.insert(key.clone(), Binding::new(strategy, lifetime));
        tracing::debug!(id = %key, ?lifetime, strategy = ?kind, replaced, "binding registered");
        self
    }

    /// Sugar for `register(id, strategy, true)`.
    pub fn singleton(&self, id: impl Into<Key>, strategy: Strategy) -> &Self {
        self.register(id, strategy, true)
    }

    /// Registers a factory invoked on every resolution.
    ///
    /// ```
    /// use autowire::Container;
    /// use std::sync::Arc;
    ///
    /// struct Session;
    ///
    /// let container = Container::new();
    /// container.register_factory("session", |_| Ok(Session));
    ///
    /// let a = container.resolve("session").unwrap();
    /// let b = container.resolve("session").unwrap();
    /// assert!(!Arc::ptr_eq(&a, &b));
    /// ```
    pub fn register_factory<T, F>(&self, id: impl Into<Key>, factory: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        self.register(id, Strategy::factory(factory), false)
    }

    /// Registers a factory whose first result is cached.
    pub fn singleton_factory<T, F>(&self, id: impl Into<Key>, factory: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        self.register(id, Strategy::factory(factory), true)
    }

    /// Binds `id` (typically an interface name) to a type auto-wired on every resolution.
    pub fn register_type(&self, id: impl Into<Key>, type_name: impl Into<Key>) -> &Self {
        self.register(id, Strategy::type_name(type_name), false)
    }

    /// Binds `id` to a type auto-wired once and then cached.
    pub fn singleton_type(&self, id: impl Into<Key>, type_name: impl Into<Key>) -> &Self {
        self.register(id, Strategy::type_name(type_name), true)
    }

    /// Registers a literal value.
    pub fn register_value<T: Send + Sync + 'static>(&self, id: impl Into<Key>, value: T) -> &Self {
        self.register(id, Strategy::value(value), false)
    }

    /// Registers a literal value behind a singleton cell.
    pub fn singleton_value<T: Send + Sync + 'static>(&self, id: impl Into<Key>, value: T) -> &Self {
        self.register(id, Strategy::value(value), true)
    }

    /// Registers a factory producing a trait object, invoked on every resolution.
    ///
    /// ```
    /// use autowire::Container;
    /// use std::sync::Arc;
    ///
    /// trait Clock: Send + Sync {
    ///     fn now(&self) -> u64;
    /// }
    ///
    /// struct Fixed;
    /// impl Clock for Fixed {
    ///     fn now(&self) -> u64 {
    ///         42
    ///     }
    /// }
    ///
    /// let container = Container::new();
    /// container.register_interface::<dyn Clock, _>("Clock", |_| Ok(Arc::new(Fixed) as Arc<dyn Clock>));
    ///
    /// let clock = container.get_interface::<dyn Clock>("Clock").unwrap();
    /// assert_eq!(clock.now(), 42);
    /// ```
    pub fn register_interface<I, F>(&self, id: impl Into<Key>, factory: F) -> &Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<Arc<I>> + Send + Sync + 'static,
    {
        self.register(id, Strategy::interface_factory(factory), false)
    }

    /// Registers a trait-object factory whose first result is cached.
    pub fn singleton_interface<I, F>(&self, id: impl Into<Key>, factory: F) -> &Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<Arc<I>> + Send + Sync + 'static,
    {
        self.register(id, Strategy::interface_factory(factory), true)
    }

    // ----- Queries -----

    /// Whether an explicit binding exists. Auto-wirable types do not count.
    pub fn has(&self, id: &str) -> bool {
        self.inner.registry.contains(id)
    }

    /// Number of explicit bindings.
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describes every binding, sorted by identifier.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        self.inner
            .registry
            .snapshot()
            .into_iter()
            .map(|(key, binding)| BindingDescriptor {
                key,
                lifetime: binding.lifetime,
                strategy: binding.strategy.kind(),
                target: match &binding.strategy {
                    Strategy::TypeName(name) => Some(name.clone()),
                    _ => None,
                },
                cached: binding.is_cached(),
            })
            .collect()
    }

    // ----- Resolution -----

    /// Resolves `id` to a type-erased value.
    ///
    /// Bound identifiers go through their strategy (and singleton cache);
    /// anything else is auto-wired through the type catalog.
    ///
    /// # Errors
    ///
    /// * `NotFound` - `id` is neither bound nor a known type
    /// * `AbstractionNotResolvable` - `id` is an interface or abstract type with no binding
    /// * any error raised while resolving a constructor parameter or running a factory
    pub fn resolve(&self, id: &str) -> DiResult<AnyArc> {
        let _depth = DepthGuard::enter(self.inner.config.max_depth)?;

        let observers = &self.inner.observers;
        if !observers.has_observers() {
            return self.resolve_unobserved(id);
        }

        let start = Instant::now();
        observers.resolving(id);
        let result = self.resolve_unobserved(id);
        match &result {
            Ok(_) => observers.resolved(id, start.elapsed()),
            Err(e) => observers.failed(id, e, start.elapsed()),
        }
        result
    }

    fn resolve_unobserved(&self, id: &str) -> DiResult<AnyArc> {
        match self.inner.registry.get(id) {
            Some(binding) => self.resolve_binding(id, &binding),
            None => self.autowire(id),
        }
    }

    /// Resolves `id` and downcasts to `T`.
    pub fn get<T: Send + Sync + 'static>(&self, id: &str) -> DiResult<Arc<T>> {
        Resolver::get(self, id)
    }

    /// Resolves `id`, mapping a `NotFound` for `id` itself to `None`.
    pub fn try_get<T: Send + Sync + 'static>(&self, id: &str) -> DiResult<Option<Arc<T>>> {
        Resolver::try_get(self, id)
    }

    /// Resolves `id` as a trait object.
    pub fn get_interface<I: ?Sized + Send + Sync + 'static>(&self, id: &str) -> DiResult<Arc<I>> {
        Resolver::get_interface(self, id)
    }

    /// Resolves `id` or panics.
    ///
    /// # Panics
    ///
    /// Panics with the resolution error.
    pub fn get_required<T: Send + Sync + 'static>(&self, id: &str) -> Arc<T> {
        Resolver::get_required(self, id)
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Container Debug ===\n");
        s.push_str(&format!("Config: {:?}\n", self.inner.config));
        s.push_str("Bindings:\n");
        for d in self.descriptors() {
            s.push_str(&format!(
                "  {}: {:?} {:?}{}{}\n",
                d.key,
                d.lifetime,
                d.strategy,
                d.target.map(|t| format!(" -> {}", t)).unwrap_or_default(),
                if d.cached { " (cached)" } else { "" },
            ));
        }
        s
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.inner.registry.len())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ResolverCore for Container {
    fn resolve(&self, id: &str) -> DiResult<AnyArc> {
        Container::resolve(self, id)
    }

    fn has(&self, id: &str) -> bool {
        Container::has(self, id)
    }

    fn register(&self, id: Key, strategy: Strategy, singleton: bool) {
        Container::register(self, id, strategy, singleton);
    }

    fn describe_type(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.inner.types.describe(name)
    }
}

/// Assembles a [`Container`] from configuration, a type catalog and observers.
///
/// # Examples
///
/// ```
/// use autowire::{Container, ContainerConfig, TypeRegistry};
/// use std::sync::Arc;
///
/// let container = Container::builder()
///     .config(ContainerConfig::default().with_max_depth(32))
///     .types(Arc::new(TypeRegistry::new()))
///     .with_tracing()
///     .build();
///
/// assert_eq!(container.config().max_depth, Some(32));
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    config: ContainerConfig,
    types: Option<Arc<dyn TypeCatalog>>,
    observers: Observers,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            types: None,
            observers: Observers::new(),
        }
    }

    pub fn config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn types<C: TypeCatalog + 'static>(mut self, types: Arc<C>) -> Self {
        self.types = Some(types as Arc<dyn TypeCatalog>);
        self
    }

    pub fn observer<O: DiObserver + 'static>(mut self, observer: Arc<O>) -> Self {
        self.observers.add(observer);
        self
    }

    /// Adds a [`TracingObserver`].
    pub fn with_tracing(self) -> Self {
        self.observer(Arc::new(TracingObserver::new()))
    }

    pub fn build(self) -> Container {
        let types = self
            .types
            .unwrap_or_else(|| Arc::new(TypeRegistry::new()) as Arc<dyn TypeCatalog>);
        Container {
            inner: Arc::new(ContainerInner {
                registry: Registry::new(),
                types,
                config: self.config,
                observers: self.observers,
            }),
        }
    }
}
