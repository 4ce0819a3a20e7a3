//! Core traits for dependency injection.

pub mod resolver;

pub use resolver::{Resolver, ResolverCore};
