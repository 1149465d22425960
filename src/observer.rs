//! Registration observability hooks.
//!
//! Observers see every registration the orchestrator performs and every
//! candidate it skips. This is the crate's diagnostics layer: wiring a
//! [`LoggingObserver`] at composition-root time makes a registration pass
//! fully traceable without touching the registration logic itself.

use crate::lifetime::Lifetime;

/// One registration performed against the container.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationEvent<'a> {
    /// Type name of the concrete candidate the factory constructs.
    pub implementation: &'static str,
    /// Type name of the service key registered under.
    pub service: &'static str,
    /// Contract the registration is scoped to (empty for the default).
    pub contract: &'a str,
    /// Lifetime submitted to the container.
    pub lifetime: Lifetime,
}

/// Hook receiving registration-pass events.
///
/// Calls are made synchronously while the registrar runs; keep
/// implementations lightweight.
///
/// # Examples
///
/// ```rust
/// use mvvm_conventions::{RegistrationEvent, RegistrationObserver};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Recorder {
///     services: Mutex<Vec<&'static str>>,
/// }
///
/// impl RegistrationObserver for Recorder {
///     fn registered(&self, event: &RegistrationEvent<'_>) {
///         self.services.lock().unwrap().push(event.service);
///     }
/// }
/// ```
pub trait RegistrationObserver: Send + Sync {
    /// Called after each registration is submitted to the container.
    fn registered(&self, event: &RegistrationEvent<'_>);

    /// Called for candidates that yield no registrations.
    fn skipped(&self, type_name: &'static str) {
        let _ = type_name;
    }
}

/// Observer that writes registration events to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl RegistrationObserver for LoggingObserver {
    fn registered(&self, event: &RegistrationEvent<'_>) {
        if event.contract.is_empty() {
            eprintln!(
                "[registration] {} as {} ({:?})",
                event.implementation, event.service, event.lifetime
            );
        } else {
            eprintln!(
                "[registration] {} as {} (contract: {}, {:?})",
                event.implementation, event.service, event.contract, event.lifetime
            );
        }
    }

    fn skipped(&self, type_name: &'static str) {
        eprintln!("[registration] skipped {}", type_name);
    }
}
