//! # autowire
//!
//! String-keyed dependency injection with singleton caching and constructor
//! auto-wiring.
//!
//! ## Features
//!
//! - **Three strategies**: factories, type names to auto-wire, literal values
//! - **Singletons**: computed once per binding, identity-stable, thread-safe
//! - **Auto-wiring**: unregistered types are built from their declared
//!   constructor parameters, recursively
//! - **Interfaces**: bind an interface name to an implementation and read it
//!   back as a trait object
//! - **Observable**: resolution hooks with a `tracing` backed observer
//!
//! ## Quick Start
//!
//! ```rust
//! use autowire::{Container, Strategy};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let container = Container::new();
//! container.singleton_factory("db", |_| {
//!     Ok(Database { url: "postgres://localhost".to_string() })
//! });
//! container.register_factory("users", |c| {
//!     Ok(UserService { db: c.get::<Database>("db")? })
//! });
//!
//! let users = container.get::<UserService>("users").unwrap();
//! assert_eq!(users.db.url, "postgres://localhost");
//!
//! // Literals come back as registered
//! container.register("service", Strategy::value("some-string"), false);
//! assert_eq!(*container.get::<&str>("service").unwrap(), "some-string");
//! ```
//!
//! ## Auto-wiring
//!
//! Types describe their constructor to a [`TypeRegistry`]. Resolving a type
//! name that has no binding builds it, resolving each typed parameter first.
//!
//! ```rust
//! use autowire::{Arguments, Container, DiResult, Injectable, Parameter, TypeRegistry};
//! use std::sync::Arc;
//!
//! struct Orm;
//! impl Injectable for Orm {
//!     const NAME: &'static str = "ORM";
//!     fn construct(_args: Arguments) -> DiResult<Self> {
//!         Ok(Orm)
//!     }
//! }
//!
//! struct Repository {
//!     orm: Arc<Orm>,
//!     page_size: Option<Arc<usize>>,
//! }
//! impl Injectable for Repository {
//!     const NAME: &'static str = "Repository";
//!     fn parameters() -> Vec<Parameter> {
//!         // Scalars are never injected: the slot stays empty
//!         vec![Parameter::of::<Orm>("orm"), Parameter::untyped("page_size")]
//!     }
//!     fn construct(args: Arguments) -> DiResult<Self> {
//!         Ok(Repository { orm: args.get(0)?, page_size: args.optional(1)? })
//!     }
//! }
//!
//! let types = Arc::new(TypeRegistry::new());
//! types.add::<Orm>().add::<Repository>();
//! let container = Container::with_types(types);
//!
//! let repo = container.get::<Repository>("Repository").unwrap();
//! assert!(repo.page_size.is_none());
//! ```
//!
//! ## Interfaces
//!
//! ```rust
//! use autowire::{Arguments, Container, DiResult, Injectable, TypeRegistry};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn name(&self) -> &'static str;
//! }
//!
//! struct FileLogger;
//! impl Logger for FileLogger {
//!     fn name(&self) -> &'static str {
//!         "file"
//!     }
//! }
//! impl Injectable for FileLogger {
//!     const NAME: &'static str = "FileLogger";
//!     fn construct(_args: Arguments) -> DiResult<Self> {
//!         Ok(FileLogger)
//!     }
//! }
//!
//! let types = Arc::new(TypeRegistry::new());
//! types
//!     .add::<FileLogger>()
//!     .implement::<dyn Logger, FileLogger>("Logger", |l| l as Arc<dyn Logger>);
//!
//! let container = Container::with_types(types);
//! container.singleton_type("Logger", "FileLogger");
//!
//! let logger = container.get_interface::<dyn Logger>("Logger").unwrap();
//! assert_eq!(logger.name(), "file");
//! ```

// Module declarations
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod global;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod registration;
pub mod traits;
pub mod types;

// Internal modules
mod internal;

// Re-export core types
pub use config::ContainerConfig;
pub use container::{Container, ContainerBuilder};
pub use descriptors::{BindingDescriptor, StrategyKind};
pub use error::{DiError, DiResult};
pub use global::{global, reset_global, set_global};
pub use key::{key_of_type, Key};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, TracingObserver};
pub use registration::{AnyArc, FactoryFn, Strategy};
pub use traits::{Resolver, ResolverCore};
pub use types::{
    Arguments, Constructor, Injectable, InterfaceCast, Parameter, ParameterType, TypeCatalog,
    TypeDescriptor, TypeKind, TypeRegistry,
};
