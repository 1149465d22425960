//! Service lifetime definitions.

/// Lifetime of a registered factory.
///
/// The registration orchestrator picks the lifetime per candidate type:
/// singleton when the caller forces it or the type descriptor carries the
/// single-instance flag, transient otherwise. The container owns the actual
/// caching; a transient factory runs on every resolution, a singleton
/// factory runs once and the container memoizes the instance.
///
/// # Examples
///
/// ```rust
/// use mvvm_conventions::Lifetime;
///
/// let lifetime = Lifetime::Transient;
/// assert_ne!(lifetime, Lifetime::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Single instance per container, created on first resolution and cached.
    Singleton,
    /// New instance per resolution, never cached.
    Transient,
}
