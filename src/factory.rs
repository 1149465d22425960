//! Factory building: from a constructor declaration to an invocable factory.

use std::any::TypeId;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::{DiError, DiResult};
use crate::internal::with_resolution_scope;
use crate::key::ServiceKey;
use crate::metadata::{Arg, Args, ConstructorMetadata, ParamSpec, TypeMetadata};
use crate::resolver::{ResolverCore, ServiceFactory};

/// Strategy turning a candidate descriptor into a service factory.
///
/// The registrar takes the strategy as an explicit collaborator
/// ([`Registrar::with_strategy`](crate::Registrar::with_strategy)) rather
/// than reading it from process-wide state, so alternative construction
/// schemes can be swapped in per registration pass.
pub trait FactoryStrategy: Send + Sync {
    /// Builds a factory producing new instances of the candidate type.
    ///
    /// Constructor selection and the per-parameter resolution plan are fixed
    /// here, once; service lookups are deferred until the factory runs.
    fn build(&self, meta: &TypeMetadata) -> DiResult<ServiceFactory>;
}

/// Default strategy: the declared constructor with the most parameters.
///
/// A parameter-count tie is `DiError::AmbiguousConstructor` and an empty
/// constructor set is `DiError::NoConstructor`. Both surface at
/// registration time, not at first resolution.
///
/// Parameter planning: primitive and string parameters are supplied as null
/// arguments (no primitive injection), collection parameters resolve every registered
/// service of the element type into a vector of exactly that length, and
/// everything else resolves one service of the parameter type. Factories
/// built here guard their invocation with cycle detection, so a circular
/// constructor graph fails with a path instead of overflowing the stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct WidestConstructor;

enum ArgPlan {
    Null,
    One(ServiceKey),
    Many(ServiceKey),
}

impl FactoryStrategy for WidestConstructor {
    fn build(&self, meta: &TypeMetadata) -> DiResult<ServiceFactory> {
        let ctor = widest_constructor(meta)?;
        let construct = Arc::clone(&ctor.construct);
        if ctor.parameter_count() == 0 {
            // Nothing to resolve: construct and return, no lookups, no guard.
            return Ok(Arc::new(move |_: &dyn ResolverCore| {
                construct(&Args::empty())
            }));
        }
        let plans: Vec<ArgPlan> = ctor.params().iter().map(plan_for).collect();
        let type_name = meta.type_name();
        Ok(Arc::new(move |resolver: &dyn ResolverCore| {
            with_resolution_scope(type_name, || {
                let mut slots = Vec::with_capacity(plans.len());
                for plan in &plans {
                    slots.push(match plan {
                        ArgPlan::Null => Arg::Null,
                        ArgPlan::One(key) => Arg::One(resolver.resolve_any(key, "")?),
                        ArgPlan::Many(key) => Arg::Many(resolver.resolve_all_any(key, "")?),
                    });
                }
                construct(&Args::new(slots))
            })
        }))
    }
}

fn widest_constructor(meta: &TypeMetadata) -> DiResult<&ConstructorMetadata> {
    let mut widest: Option<&ConstructorMetadata> = None;
    let mut tied = false;
    for ctor in meta.constructors() {
        match widest {
            None => widest = Some(ctor),
            Some(best) if ctor.parameter_count() > best.parameter_count() => {
                widest = Some(ctor);
                tied = false;
            }
            Some(best) if ctor.parameter_count() == best.parameter_count() => tied = true,
            Some(_) => {}
        }
    }
    let widest = widest.ok_or(DiError::NoConstructor(meta.type_name()))?;
    if tied {
        return Err(DiError::AmbiguousConstructor {
            type_name: meta.type_name(),
            parameter_count: widest.parameter_count(),
        });
    }
    Ok(widest)
}

fn plan_for(spec: &ParamSpec) -> ArgPlan {
    match spec {
        ParamSpec::Service(key) if is_primitive_like(key) => ArgPlan::Null,
        ParamSpec::Service(key) => ArgPlan::One(*key),
        ParamSpec::Collection(element) => ArgPlan::Many(*element),
    }
}

// Types that are never injected: the factory supplies a null argument.
static PRIMITIVE_IDS: Lazy<Vec<TypeId>> = Lazy::new(|| {
    vec![
        TypeId::of::<bool>(),
        TypeId::of::<char>(),
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
        TypeId::of::<f32>(),
        TypeId::of::<f64>(),
        TypeId::of::<String>(),
        TypeId::of::<&'static str>(),
    ]
});

fn is_primitive_like(key: &ServiceKey) -> bool {
    PRIMITIVE_IDS.contains(&key.type_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_like_covers_strings_and_numbers() {
        assert!(is_primitive_like(&ServiceKey::of::<u32>()));
        assert!(is_primitive_like(&ServiceKey::of::<bool>()));
        assert!(is_primitive_like(&ServiceKey::of::<String>()));
        assert!(is_primitive_like(&ServiceKey::of::<&'static str>()));
    }

    #[test]
    fn user_types_are_not_primitive_like() {
        struct Widget;
        assert!(!is_primitive_like(&ServiceKey::of::<Widget>()));
        assert!(!is_primitive_like(&ServiceKey::of::<Vec<u8>>()));
    }
}
