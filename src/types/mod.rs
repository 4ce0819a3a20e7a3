//! Type introspection for auto-wiring.
//!
//! Rust has no runtime reflection, so the container asks a [`TypeCatalog`]
//! what it knows about a type name: whether the type exists, whether it can
//! be instantiated, and which parameters its constructor declares. The
//! [`TypeRegistry`] is a hand-maintained catalog; hosts may plug in their own.

use std::fmt;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::{key_of_type, Key};
use crate::registration::AnyArc;

pub mod arguments;
pub mod registry;

pub use arguments::Arguments;
pub use registry::TypeRegistry;

/// Type-erased constructor for a concrete type.
pub type Constructor = Arc<dyn Fn(Arguments) -> DiResult<AnyArc> + Send + Sync>;

/// Turns an implementation value into an `Arc<Arc<dyn Interface>>`, or `None`
/// when the value is some other implementation.
pub type InterfaceCast = Arc<dyn Fn(&AnyArc) -> Option<AnyArc> + Send + Sync>;

/// Source of type descriptors for auto-wiring.
///
/// # Examples
///
/// ```rust
/// use autowire::{TypeCatalog, TypeDescriptor};
/// use std::sync::Arc;
///
/// struct NoTypes;
///
/// impl TypeCatalog for NoTypes {
///     fn describe(&self, _name: &str) -> Option<Arc<TypeDescriptor>> {
///         None
///     }
/// }
///
/// assert!(!NoTypes.knows("User"));
/// ```
pub trait TypeCatalog: Send + Sync {
    /// Describes `name`, or `None` when no such type exists.
    fn describe(&self, name: &str) -> Option<Arc<TypeDescriptor>>;

    fn knows(&self, name: &str) -> bool {
        self.describe(name).is_some()
    }
}

/// Self-construction contract for auto-wirable types.
///
/// # Examples
///
/// ```rust
/// use autowire::{Arguments, DiResult, Injectable, Parameter};
/// use std::sync::Arc;
///
/// struct Orm;
///
/// impl Injectable for Orm {
///     const NAME: &'static str = "ORM";
///
///     fn construct(_args: Arguments) -> DiResult<Self> {
///         Ok(Orm)
///     }
/// }
///
/// struct User {
///     orm: Arc<Orm>,
/// }
///
/// impl Injectable for User {
///     const NAME: &'static str = "User";
///
///     fn parameters() -> Vec<Parameter> {
///         vec![Parameter::of::<Orm>("orm")]
///     }
///
///     fn construct(args: Arguments) -> DiResult<Self> {
///         Ok(User { orm: args.get(0)? })
///     }
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Type name the catalog knows this type by.
    const NAME: &'static str;

    /// Constructor parameters in declaration order.
    fn parameters() -> Vec<Parameter> {
        Vec::new()
    }

    fn construct(args: Arguments) -> DiResult<Self>;
}

/// Declared type of a constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    /// An object type, resolved by name
    Typed(Key),
    /// Primitive, untyped or union parameter; never supplied
    Untyped,
}

/// One constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub ty: ParameterType,
}

impl Parameter {
    /// Parameter whose type is an [`Injectable`].
    pub fn of<T: Injectable>(name: &'static str) -> Self {
        Self {
            name,
            ty: ParameterType::Typed(key_of_type::<T>()),
        }
    }

    /// Parameter typed by name, e.g. an interface.
    pub fn typed(name: &'static str, type_name: impl Into<Key>) -> Self {
        Self {
            name,
            ty: ParameterType::Typed(type_name.into()),
        }
    }

    pub fn untyped(name: &'static str) -> Self {
        Self {
            name,
            ty: ParameterType::Untyped,
        }
    }

    /// The declared type name, if any.
    pub fn type_name(&self) -> Option<&str> {
        match &self.ty {
            ParameterType::Typed(key) => Some(key.as_str()),
            ParameterType::Untyped => None,
        }
    }
}

/// What kind of type a descriptor describes.
#[derive(Clone)]
pub enum TypeKind {
    /// Instantiable through its constructor
    Concrete {
        parameters: Vec<Parameter>,
        constructor: Constructor,
    },
    /// Exists but cannot be instantiated
    Abstract,
    /// Trait known by name, with casts from its registered implementations
    Interface { implementations: Vec<InterfaceCast> },
}

/// Introspection result for one type name.
#[derive(Clone)]
pub struct TypeDescriptor {
    name: Key,
    kind: TypeKind,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<Key>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &Key {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn is_instantiable(&self) -> bool {
        matches!(self.kind, TypeKind::Concrete { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface { .. })
    }

    /// Constructor parameters; empty for non-instantiable types.
    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            TypeKind::Concrete { parameters, .. } => parameters,
            _ => &[],
        }
    }

    /// Casts `value` to this interface using the first matching implementation.
    ///
    /// Values that are not a registered implementation are returned unchanged.
    pub fn cast(&self, value: AnyArc) -> AnyArc {
        if let TypeKind::Interface { implementations } = &self.kind {
            for cast in implementations {
                if let Some(cast) = cast(&value) {
                    return cast;
                }
            }
        }
        value
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            TypeKind::Concrete { .. } => "Concrete",
            TypeKind::Abstract => "Abstract",
            TypeKind::Interface { .. } => "Interface",
        };
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("parameters", &self.parameters())
            .finish()
    }
}
