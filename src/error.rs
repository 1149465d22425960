//! Error types for registration and resolution.

use std::fmt;

/// Errors surfaced by registration, factory building and resolution.
///
/// All failures are fail-fast: a registration error leaves prior
/// registrations in place, and a resolution error propagates out of the
/// factory invocation untouched.
///
/// # Examples
///
/// ```rust
/// use mvvm_conventions::{DiError, Resolver, ServiceLocator};
///
/// let locator = ServiceLocator::new();
/// match locator.get::<String>() {
///     Err(DiError::NotFound { service, .. }) => {
///         assert_eq!(service, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// No registration under the requested key and contract
    NotFound {
        /// Type name of the requested service key
        service: &'static str,
        /// Contract the lookup was scoped to (empty string for the default)
        contract: String,
    },
    /// Type downcast failed
    TypeMismatch(&'static str),
    /// Candidate type declares no constructor
    NoConstructor(&'static str),
    /// Two or more declared constructors tie on parameter count
    AmbiguousConstructor {
        /// Type name of the candidate
        type_name: &'static str,
        /// The tied parameter count
        parameter_count: usize,
    },
    /// A service key was requested that the candidate type never declared
    UndeclaredInterface {
        /// Type name of the candidate
        type_name: &'static str,
        /// Type name of the missing interface
        service: &'static str,
    },
    /// Dependency cycle detected during factory invocation (includes path)
    Circular(Vec<&'static str>),
    /// Maximum resolution depth exceeded
    DepthExceeded(usize),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound { service, contract } if contract.is_empty() => {
                write!(f, "Service not found: {}", service)
            }
            DiError::NotFound { service, contract } => {
                write!(f, "Service not found: {} (contract: {})", service, contract)
            }
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::NoConstructor(name) => {
                write!(f, "No constructor declared for: {}", name)
            }
            DiError::AmbiguousConstructor { type_name, parameter_count } => write!(
                f,
                "Ambiguous constructors for {}: more than one takes {} parameters",
                type_name, parameter_count
            ),
            DiError::UndeclaredInterface { type_name, service } => {
                write!(f, "{} does not declare {}", type_name, service)
            }
            DiError::Circular(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for registration and resolution operations
///
/// A convenience alias for `Result<T, DiError>` used throughout the crate.
///
/// # Examples
///
/// ```rust
/// use mvvm_conventions::{DiError, DiResult};
///
/// fn lookup() -> DiResult<String> {
///     Err(DiError::TypeMismatch("example"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
