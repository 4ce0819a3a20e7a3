//! Binding registration types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex, RwLock};

use crate::container::Container;
use crate::descriptors::StrategyKind;
use crate::error::DiResult;
use crate::internal::HashMap;
use crate::key::Key;
use crate::lifetime::Lifetime;

/// Type-erased shared value, the currency of resolution.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Type-erased factory stored in a [`Strategy::Factory`].
pub type FactoryFn = Arc<dyn Fn(&Container) -> DiResult<AnyArc> + Send + Sync>;

/// How a binding produces its value.
///
/// The variant is decided once, at registration time, and never re-inspected.
///
/// # Examples
///
/// ```rust
/// use autowire::{Container, Strategy};
///
/// struct Mailer;
///
/// let container = Container::new();
/// container
///     .register("mailer", Strategy::factory(|_| Ok(Mailer)), false)
///     .register("greeting", Strategy::value("hello".to_string()), false)
///     .register("Logger", Strategy::type_name("FileLogger"), true);
///
/// assert!(container.has("mailer"));
/// assert_eq!(*container.get::<String>("greeting").unwrap(), "hello");
/// ```
#[derive(Clone)]
pub enum Strategy {
    /// Invoked with the container so it can pull further dependencies
    Factory(FactoryFn),
    /// Auto-wire the named type through the type catalog
    TypeName(Key),
    /// Returned as-is
    Literal(AnyArc),
}

impl Strategy {
    /// Wraps a typed factory closure.
    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        Strategy::Factory(Arc::new(move |c: &Container| {
            factory(c).map(|value| Arc::new(value) as AnyArc)
        }))
    }

    /// Wraps a factory producing a trait object.
    ///
    /// The value is stored as `Arc<Arc<I>>` so it can be read back with
    /// [`Container::get_interface`].
    pub fn interface_factory<I, F>(factory: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<Arc<I>> + Send + Sync + 'static,
    {
        Strategy::Factory(Arc::new(move |c: &Container| {
            factory(c).map(|value| Arc::new(value) as AnyArc)
        }))
    }

    /// Builds the named type by auto-wiring.
    pub fn type_name(name: impl Into<Key>) -> Self {
        Strategy::TypeName(name.into())
    }

    /// A literal value, returned on every resolution.
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Strategy::Literal(Arc::new(value))
    }

    /// A literal that is already type-erased.
    pub fn shared(value: AnyArc) -> Self {
        Strategy::Literal(value)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Factory(_) => StrategyKind::Factory,
            Strategy::TypeName(_) => StrategyKind::TypeName,
            Strategy::Literal(_) => StrategyKind::Literal,
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Factory(_) => f.write_str("Factory(..)"),
            Strategy::TypeName(name) => f.debug_tuple("TypeName").field(name).finish(),
            Strategy::Literal(_) => f.write_str("Literal(..)"),
        }
    }
}

enum CellState {
    Empty,
    Building(ThreadId),
    Ready(AnyArc),
}

/// Singleton cache for one binding.
///
/// Check-compute-store is atomic: the first caller claims the cell, computes
/// outside the lock, and publishes the value; concurrent callers wait. `Ready`
/// holds whatever the strategy produced, so an empty-looking value is still a
/// cached value.
pub(crate) struct SingletonCell {
    state: Mutex<CellState>,
    ready: Condvar,
}

impl SingletonCell {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(CellState::Empty),
            ready: Condvar::new(),
        }
    }

    pub(crate) fn get(&self) -> Option<AnyArc> {
        match &*self.state.lock() {
            CellState::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub(crate) fn get_or_try_init<F>(&self, init: F) -> DiResult<AnyArc>
    where
        F: FnOnce() -> DiResult<AnyArc>,
    {
        let me = thread::current().id();
        let mut state = self.state.lock();
        loop {
            let owner = match &*state {
                CellState::Ready(value) => return Ok(value.clone()),
                CellState::Building(owner) => *owner,
                CellState::Empty => break,
            };
            if owner == me {
                // Re-entered from our own factory: a cycle. Recurse without claiming.
                drop(state);
                return init();
            }
            self.ready.wait(&mut state);
        }
        *state = CellState::Building(me);
        drop(state);

        let mut claim = Claim { cell: self, settled: false };
        let result = init();
        claim.settle(&result);
        result
    }

    fn publish(&self, next: CellState) {
        *self.state.lock() = next;
        self.ready.notify_all();
    }
}

/// Releases a claimed cell even if the factory unwinds.
struct Claim<'a> {
    cell: &'a SingletonCell,
    settled: bool,
}

impl Claim<'_> {
    fn settle(&mut self, result: &DiResult<AnyArc>) {
        let next = match result {
            Ok(value) => CellState::Ready(value.clone()),
            Err(_) => CellState::Empty,
        };
        self.cell.publish(next);
        self.settled = true;
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.cell.publish(CellState::Empty);
        }
    }
}

/// One registry entry
pub(crate) struct Binding {
    pub(crate) strategy: Strategy,
    pub(crate) lifetime: Lifetime,
    pub(crate) cell: Option<SingletonCell>,
}

impl Binding {
    pub(crate) fn new(strategy: Strategy, lifetime: Lifetime) -> Self {
        let cell = lifetime.is_cacheable().then(SingletonCell::new);
        Self {
            strategy,
            lifetime,
            cell,
        }
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.cell.as_ref().and_then(SingletonCell::get).is_some()
    }
}

/// Binding registry
///
/// Bindings are handed out as `Arc`s so no lock is held while a strategy runs.
pub(crate) struct Registry {
    bindings: RwLock<HashMap<Key, Arc<Binding>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::default()),
        }
    }

    /// Stores the binding, returning true when an existing one was replaced.
    pub(crate) fn insert(&self, key: Key, binding: Binding) -> bool {
        self.bindings.write().insert(key, Arc::new(binding)).is_some()
    }

    #[inline]
    pub(crate) fn get(&self, id: &str) -> Option<Arc<Binding>> {
        self.bindings.read().get(id).cloned()
    }

    #[inline]
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.bindings.read().contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.read().len()
    }

    /// Entries sorted by key.
    pub(crate) fn snapshot(&self) -> Vec<(Key, Arc<Binding>)> {
        let mut entries: Vec<_> = self
            .bindings
            .read()
            .iter()
            .map(|(k, b)| (k.clone(), b.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
