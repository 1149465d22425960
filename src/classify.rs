//! Type classification: is a candidate a view, a view-model, or neither.

use crate::key::ServiceKey;
use crate::metadata::{InterfaceMetadata, TypeMetadata};

/// The two marker capabilities a registration pass classifies against.
///
/// Both are supplied by the caller: `view_marker` is the UI framework's
/// non-parameterized "is a view" capability, `view_model_base` is the
/// application's view-model base capability.
#[derive(Debug, Clone, Copy)]
pub struct Conventions {
    /// Capability marking view types (e.g. the bare "view for" interface).
    pub view_marker: ServiceKey,
    /// Capability marking view-model types.
    pub view_model_base: ServiceKey,
}

/// Outcome of classifying one candidate type.
///
/// The branches are mutually exclusive and tested in order: the view check
/// first, the view-model check second. Multiplicity inside a branch is
/// intentional; every qualifying interface yields its own registration.
#[derive(Debug)]
pub enum Classification<'a> {
    /// Implements the view marker. `targets` holds each declared interface
    /// specializing the marker; empty means the type implements only the
    /// bare marker and produces no registrations.
    View {
        /// Interfaces to register the view under.
        targets: Vec<&'a InterfaceMetadata>,
    },
    /// Assignable to the view-model base. Registered under itself, under the
    /// base with the type's own full name as contract, and under each entry
    /// in `specifics`.
    ViewModel {
        /// Further declared interfaces specializing the base capability.
        specifics: Vec<&'a InterfaceMetadata>,
    },
    /// Matches neither convention; the candidate is skipped silently.
    Neither,
}

/// Classifies `meta` against both conventions, view branch first.
pub fn classify<'a>(meta: &'a TypeMetadata, conventions: &Conventions) -> Classification<'a> {
    if let Some(targets) = classify_view(meta, &conventions.view_marker) {
        return Classification::View { targets };
    }
    if let Some(specifics) = classify_view_model(meta, &conventions.view_model_base) {
        return Classification::ViewModel { specifics };
    }
    Classification::Neither
}

/// The view branch alone.
///
/// `None` when the candidate does not implement `view_marker` at all.
/// `Some(vec![])` when it implements only the bare marker: a qualifying
/// implementer with nothing to register under, since the raw marker itself
/// is never a registration target by default.
pub fn classify_view<'a>(
    meta: &'a TypeMetadata,
    view_marker: &ServiceKey,
) -> Option<Vec<&'a InterfaceMetadata>> {
    if !meta.implements(view_marker) {
        return None;
    }
    Some(meta.interfaces_extending(view_marker).collect())
}

/// The view-model branch alone.
///
/// `None` when the candidate is not assignable to `view_model_base`;
/// otherwise the declared interfaces that specialize the base, which the
/// registrar adds to the self- and base-capability registrations.
pub fn classify_view_model<'a>(
    meta: &'a TypeMetadata,
    view_model_base: &ServiceKey,
) -> Option<Vec<&'a InterfaceMetadata>> {
    if !meta.is_assignable_to(view_model_base) {
        return None;
    }
    Some(meta.interfaces_extending(view_model_base).collect())
}
