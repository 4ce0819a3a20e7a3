//! Error types for the dependency injection container.

use thiserror::Error;

/// Dependency injection errors
///
/// Represents the conditions that can occur while resolving an identifier,
/// building an auto-wired type, or loading container configuration.
///
/// # Examples
///
/// ```rust
/// use autowire::{Container, DiError};
///
/// let container = Container::new();
/// match container.resolve("NonExistantClass") {
///     Err(DiError::NotFound(id)) => assert_eq!(id, "NonExistantClass"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use autowire::DiError;
///
/// let not_found = DiError::NotFound("Mailer".to_string());
/// let abstraction = DiError::AbstractionNotResolvable("Logger".to_string());
///
/// println!("Error: {}", not_found);
/// println!("Error: {}", abstraction);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
    /// Identifier is neither bound nor a known type
    #[error("Service not found: {0}")]
    NotFound(String),
    /// Identifier names an interface or abstract type with no binding
    #[error("Could not resolve interface or abstract class: {0}")]
    AbstractionNotResolvable(String),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(String),
    /// A constructor asked for an argument that auto-wiring left absent
    #[error("Missing argument `{parameter}` for {type_name}")]
    MissingArgument {
        type_name: String,
        parameter: String,
    },
    /// Configured maximum resolution depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Application factory or constructor failed
    #[error("Construction failed: {0}")]
    Construction(String),
}

impl DiError {
    /// Wraps an application failure raised inside a factory or constructor.
    pub fn construction(message: impl Into<String>) -> Self {
        DiError::Construction(message.into())
    }

    /// True for the two failures that mean "nothing can be built for this identifier".
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, DiError::NotFound(_) | DiError::AbstractionNotResolvable(_))
    }
}

/// Result type for DI operations
///
/// A convenience alias for `Result<T, DiError>` used throughout the crate.
///
/// # Examples
///
/// ```rust
/// use autowire::{DiResult, DiError};
///
/// fn open_pool() -> DiResult<u32> {
///     Err(DiError::construction("pool exhausted"))
/// }
///
/// assert!(open_pool().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
